//! Persistence and session layer over `doors-core`.
//!
//! `doors-runtime` owns everything the pure core refuses to: reading the
//! wall clock, generating seeds, and storing saves. A [`Session`] wires the
//! loaded [`doors_core::GameConfigs`] to a [`SaveRepository`] and a
//! [`Clock`], drives actions through the engine, and exposes the
//! between-action projections a frontend renders from.

pub mod clock;
pub mod error;
pub mod repository;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RepositoryError, SessionError};
pub use repository::{FileSaveRepository, InMemorySaveRepository, SaveRepository, SaveSlotMeta};
pub use session::{BattleResult, Session};
