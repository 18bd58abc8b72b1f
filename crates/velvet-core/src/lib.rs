//! Stock management and fusion engine for the Velvet Room.
//!
//! A single player collects personas, each tagged with an arcana,
//! through random summoning and cross-arcana fusion. This crate holds
//! all the business rules — the catalog, the player profile, the
//! capacity-bounded stock, the fusion engine, and level progression —
//! backed by a SQLite store. Frontends drive it through
//! [`GameSession`].

/// Read-only view over the persona catalog.
pub mod catalog;
/// Session configuration.
pub mod config;
/// Fault types used throughout the crate.
pub mod error;
/// The fusion engine.
pub mod fusion;
/// Core data types: arcanas, personas, players.
pub mod model;
/// Expected-outcome reporting (rejections are values, not errors).
pub mod outcome;
/// Player profiles.
pub mod player;
/// Level progression rules and rewards.
pub mod progression;
/// Catalog seed data and loading.
pub mod seed;
/// The session facade frontends drive.
pub mod session;
/// Stock operations: list, summon, release.
pub mod stock;
/// SQLite-backed relational store.
pub mod store;

/// Re-export session configuration.
pub use config::GameConfig;
/// Re-export error types.
pub use error::{VelvetError, VelvetResult};
/// Re-export core model types.
pub use model::{Arcana, ArcanaId, Persona, PersonaId, Player, PlayerId, StockEntry};
/// Re-export outcome types.
pub use outcome::{Outcome, Rejection};
/// Re-export the session facade.
pub use session::GameSession;
/// Re-export the store handle.
pub use store::Store;
