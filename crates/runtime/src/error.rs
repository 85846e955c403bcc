//! Error types for the persistence and session layers.

use doors_core::EngineError;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors surfaced by [`crate::Session`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to load configs: {0:#}")]
    Config(#[from] anyhow::Error),

    #[error("no active save slot")]
    NoActiveSlot,

    #[error("save slot not found: {0}")]
    SlotNotFound(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
