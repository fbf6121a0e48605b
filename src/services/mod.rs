pub mod api_client;
pub mod storage;
pub mod cache_service;
pub mod offline_service;
pub mod network_monitor;
#[cfg(test)]
pub mod fake_api;

pub use api_client::{ApiClient, ApiError, ApiResult, ReportApi};
pub use storage::{KeyValueStore, MemoryStorage, StorageError};
pub use cache_service::ReportCache;
pub use offline_service::ActionQueue;
pub use network_monitor::NetworkStatus;
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
#[cfg(target_arch = "wasm32")]
pub use network_monitor::NetworkMonitor;
