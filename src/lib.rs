pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search;
pub mod store;
pub mod utils;

use crate::store::applications::ApplicationStore;
use crate::store::client::DataClient;
use crate::store::jobs::JobStore;

#[derive(Clone)]
pub struct AppState {
    pub jobs: JobStore,
    pub applications: ApplicationStore,
}

impl AppState {
    /// The data client is handed in rather than read from global config
    /// so tests can point the state at a local stub.
    pub fn new(data: DataClient) -> Self {
        Self {
            jobs: JobStore::new(data.clone()),
            applications: ApplicationStore::new(data),
        }
    }
}
