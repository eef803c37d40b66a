//! Port contracts for blob storage.

pub mod storage;

pub use storage::{ObjectStorage, StorageError, StorageResult};
