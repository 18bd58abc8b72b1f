//! A single-player game session against one store.
//!
//! `GameSession` is the boundary the menu collaborator drives: it owns
//! the store, the player profile, and the RNG, and exposes the summon,
//! release, fusion, and listing operations. All business rules live in
//! the modules behind it; selectors crossing this boundary are persona
//! ids — a numbered-menu frontend translates positions to ids via
//! [`GameSession::stock_entry_by_number`] first.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::error::{VelvetError, VelvetResult};
use crate::model::{Arcana, ArcanaId, Persona, PersonaId, Player, StockEntry};
use crate::outcome::Outcome;
use crate::store::Store;
use crate::{catalog::Catalog, fusion, player, stock};

/// An interactive game session for one player.
pub struct GameSession {
    store: Store,
    player: Player,
    rng: StdRng,
}

impl GameSession {
    /// Open a session, looking the player up by name and creating the
    /// profile on first sight.
    pub fn open(store: Store, player_name: &str, config: GameConfig) -> VelvetResult<Self> {
        let player = player::get_or_create(&store, player_name, config.stock_capacity)?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { store, player, rng })
    }

    /// The player this session acts for.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player's fixed stock capacity.
    pub fn stock_capacity(&self) -> u32 {
        self.player.stock_capacity
    }

    /// The player's stock in listing order.
    pub fn list_stock(&self) -> VelvetResult<Vec<StockEntry>> {
        stock::list(&self.store, self.player.id)
    }

    /// Number of personas in the player's stock.
    pub fn stock_count(&self) -> VelvetResult<u32> {
        stock::count(&self.store, self.player.id)
    }

    /// The n-th (1-based) entry of the current stock listing.
    pub fn stock_entry_by_number(&self, number: usize) -> VelvetResult<Option<StockEntry>> {
        stock::entry_by_number(&self.store, self.player.id, number)
    }

    /// Summon a random persona. Raises the player level by 1 on success.
    pub fn summon(&mut self) -> VelvetResult<Outcome<Persona>> {
        let outcome = stock::summon(&mut self.store, &self.player, &mut self.rng)?;
        if outcome.is_done() {
            self.refresh_player()?;
        }
        Ok(outcome)
    }

    /// Release a persona from the stock back into the pool.
    pub fn release(&mut self, persona: PersonaId) -> VelvetResult<Outcome<Persona>> {
        stock::release(&self.store, self.player.id, persona)
    }

    /// Fuse two stock personas into a new one. Raises the player level
    /// by 3 on success.
    pub fn fuse(&mut self, first: PersonaId, second: PersonaId) -> VelvetResult<Outcome<Persona>> {
        let outcome = fusion::fuse(&mut self.store, &self.player, first, second, &mut self.rng)?;
        if outcome.is_done() {
            self.refresh_player()?;
        }
        Ok(outcome)
    }

    /// All arcanas in the catalog.
    pub fn arcanas(&self) -> VelvetResult<Vec<Arcana>> {
        Catalog::new(&self.store).arcanas()
    }

    /// All catalog personas of one arcana.
    pub fn personas_for_arcana(&self, arcana: ArcanaId) -> VelvetResult<Vec<Persona>> {
        Catalog::new(&self.store).personas_by_arcana(arcana)
    }

    fn refresh_player(&mut self) -> VelvetResult<()> {
        self.player = self
            .store
            .player_by_id(self.player.id)?
            .ok_or(VelvetError::PlayerNotFound(self.player.id))?;
        Ok(())
    }
}
