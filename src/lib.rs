pub mod api;
pub mod config;
pub mod error;
pub mod search;
pub mod state;
pub mod store;
pub mod types;
