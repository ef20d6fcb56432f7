mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{Result, StorageError};
pub use http_mapping::storage_error_to_status_code;
pub use traits::ItemStore;
pub use types::CollisionPolicy;
