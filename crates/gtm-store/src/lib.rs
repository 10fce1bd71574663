pub mod cache_lock;
pub mod path_resolver;
pub mod store_manager;

pub use cache_lock::CacheLock;
pub use path_resolver::PathResolver;
pub use store_manager::{StoreLocation, StoreManager};
