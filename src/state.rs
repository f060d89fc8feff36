use std::sync::Arc;

use anyhow::Result;
use deadpool_postgres::Runtime;
use once_cell::sync::Lazy;
use tokio_postgres::NoTls;

use crate::{
    config::CONFIG,
    store::{AdvocateStore, PostgresStore},
};

pub static STATE: Lazy<State> = Lazy::new(|| State::new().expect("Failed to create state"));

#[derive(Clone)]
pub struct State {
    pub store: Arc<dyn AdvocateStore>,
}

impl State {
    pub fn new() -> Result<Self> {
        let postgres_pool = CONFIG
            .postgres_config()
            .create_pool(Some(Runtime::Tokio1), NoTls)?;
        Ok(Self::with_store(PostgresStore::new(postgres_pool)))
    }

    pub fn with_store(store: impl AdvocateStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
