//! Expected-outcome reporting for game operations.
//!
//! A rejected summon or fusion is an ordinary result of play, not a
//! fault: it travels in the `Ok` branch as [`Outcome::Rejected`] so the
//! caller can report it and prompt again. Storage failures use
//! [`crate::error::VelvetError`] instead and abort the operation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why an operation was refused. Every rejection leaves ownership and
/// levels untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// A referenced persona does not exist or is not in the player's stock.
    NotInStock,
    /// The stock already holds as many personas as the player's capacity.
    StockFull,
    /// Both fusion inputs belong to the same arcana.
    SameArcana,
    /// No catalog persona matches the selection criteria.
    NoCandidate,
    /// A user-supplied selector was out of range.
    InvalidSelection,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInStock => write!(f, "not in your stock"),
            Self::StockFull => write!(f, "your stock is full"),
            Self::SameArcana => write!(f, "same arcana, fusion failed"),
            Self::NoCandidate => write!(f, "no valid persona found"),
            Self::InvalidSelection => write!(f, "invalid selection"),
        }
    }
}

/// Result of a game operation that can be refused without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation went through, carrying its product.
    Done(T),
    /// The operation was refused; nothing changed.
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    /// Whether the operation went through.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// The rejection reason, if refused.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Done(_) => None,
            Self::Rejected(r) => Some(*r),
        }
    }

    /// Unwrap into the product, if the operation went through.
    pub fn into_done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }
}
