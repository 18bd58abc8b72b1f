use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of an arcana row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArcanaId(pub i64);

impl fmt::Display for ArcanaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a persona in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonaId(pub i64);

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a player profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A categorical tag on personas. Immutable reference data; many
/// personas belong to one arcana.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arcana {
    /// Row id of the arcana.
    pub id: ArcanaId,
    /// Display name (Fool, Magician, ...).
    pub name: String,
}

/// The core collectible entity. A persona is a catalog-wide singleton:
/// it either belongs to no one (available in the pool) or to exactly
/// one player. Ownership is the only field that changes after seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Row id of the persona.
    pub id: PersonaId,
    /// Display name.
    pub name: String,
    /// Level in 1-99, fixed at seeding.
    pub level: u32,
    /// The arcana this persona belongs to.
    pub arcana_id: ArcanaId,
    /// The owning player, if any.
    pub owner: Option<PlayerId>,
}

impl Persona {
    /// Whether this persona currently sits in the given player's stock.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Level {})", self.name, self.level)
    }
}

/// A player profile. One profile per distinct name, created on first
/// sight and kept forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Row id of the player.
    pub id: PlayerId,
    /// Player name, unique across the store.
    pub name: String,
    /// Level in 1-99, monotonically non-decreasing during play.
    pub level: u32,
    /// Maximum stock size, fixed at creation.
    pub stock_capacity: u32,
}

/// One row of a stock listing: the persona joined with its arcana name
/// for display. Listing order is persona id ascending, which is also
/// the index used for selection by number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    /// The listed persona.
    pub persona_id: PersonaId,
    /// Persona name.
    pub name: String,
    /// Persona level.
    pub level: u32,
    /// Name of the persona's arcana.
    pub arcana_name: String,
}
