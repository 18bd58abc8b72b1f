//! Error types for the game engine.
//!
//! Only faults live here: storage failures and broken references.
//! Expected rejections (full stock, bad fusion pair) are values, see
//! [`crate::outcome`].

use thiserror::Error;

use crate::model::PlayerId;

/// Result type for game operations.
pub type VelvetResult<T> = Result<T, VelvetError>;

/// Faults that abort the current operation.
#[derive(Debug, Error)]
pub enum VelvetError {
    /// The referenced player id does not exist in the store.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A catalog seed referenced an arcana it never declared.
    #[error("unknown arcana in catalog seed: \"{0}\"")]
    UnknownArcana(String),

    /// A catalog seed carried a persona level outside 1-99.
    #[error("persona level out of range in catalog seed: \"{name}\" at {level}")]
    InvalidLevel {
        /// Name of the offending persona.
        name: String,
        /// The rejected level.
        level: u32,
    },

    /// A catalog seed document failed to parse.
    #[error("invalid catalog seed: {0}")]
    Seed(#[from] serde_json::Error),

    /// Underlying SQLite failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
