//! Flat-file JSON stores for orders and customer accounts.
//!
//! # Data directory
//!
//! - `orders.json` - every order ever placed, append-only
//! - `users.json` - customer accounts with embedded order history
//!
//! Each store is a whole-file read / mutate / write repository. Writes are
//! serialized behind an async mutex, so two checkouts in the same process
//! cannot clobber each other; the files themselves carry no cross-process
//! guarantee.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod orders;
pub mod users;

pub use orders::OrderStore;
pub use users::UserStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Filesystem error reading or writing a store file.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data in the store file is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Read a whole JSON array from disk. A missing file reads as empty.
pub(crate) async fn read_collection<T: DeserializeOwned>(
    path: &Path,
) -> Result<Vec<T>, RepositoryError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::DataCorruption(format!("{}: {e}", path.display()))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Write a whole JSON array back to disk, creating the parent directory
/// on first use.
pub(crate) async fn write_collection<T: Serialize>(
    path: &Path,
    items: &[T],
) -> Result<(), RepositoryError> {
    let json = serde_json::to_vec_pretty(items)
        .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;
    Ok(())
}
