pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod services;
pub mod session;
pub mod startup;

use metrics_exporter_prometheus::PrometheusHandle;
use services::AddressBook;
use std::sync::Arc;

pub use startup::Application;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub address_book: Arc<AddressBook>,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(address_book: AddressBook, metrics: PrometheusHandle) -> Self {
        Self {
            address_book: Arc::new(address_book),
            metrics,
        }
    }
}
