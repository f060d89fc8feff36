use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::State;

pub mod records;

pub fn routes() -> Router<State> {
    Router::new().merge(records::routes())
}

/// Full application with layers, ready to serve.
pub fn app(state: State, is_dev: bool) -> Router {
    let router = routes().layer(TraceLayer::new_for_http());
    let router = match is_dev {
        true => router.layer(CorsLayer::permissive()),
        false => router,
    };
    router.with_state(state)
}
