pub mod adapters;
pub mod domain;
pub mod infra;
pub mod services;

use {
    domain::{config::SharedConfig, store::OrderStore},
    services::locks::OrderLocks,
    std::sync::Arc,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub locks: Arc<OrderLocks>,
    pub config: SharedConfig,
}
