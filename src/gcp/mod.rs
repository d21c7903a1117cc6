//! Google Cloud helpers: credential resolution, Secret Manager, Cloud Storage.

mod auth;
pub mod secret_manager;
pub mod storage;

pub use secret_manager::{SecretManagerClient, SecretStore};
pub use storage::StorageClient;
