//! Configuration for a game session.

/// Stock capacity assigned to players created without an override.
pub const DEFAULT_STOCK_CAPACITY: u32 = 8;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible summon and fusion draws.
    pub seed: u64,
    /// Stock capacity for newly created players. Existing players keep
    /// the capacity they were created with.
    pub stock_capacity: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            stock_capacity: DEFAULT_STOCK_CAPACITY,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the capacity for newly created players (at least 1).
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.stock_capacity = capacity.max(1);
        self
    }
}
