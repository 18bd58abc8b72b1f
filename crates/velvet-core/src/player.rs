//! Player profiles: lookup-or-create and level bookkeeping.

use crate::error::{VelvetError, VelvetResult};
use crate::model::{Player, PlayerId};
use crate::progression;
use crate::store::Store;

/// Look up a player by name, creating one at level 1 with the given
/// stock capacity on first sight. One profile per distinct name.
pub fn get_or_create(store: &Store, name: &str, stock_capacity: u32) -> VelvetResult<Player> {
    if let Some(player) = store.player_by_name(name)? {
        return Ok(player);
    }
    store.insert_player(name, stock_capacity)
}

/// Raise a player's level by `delta`, capped at 99. Persists and
/// returns the new level; excess above the cap is silently discarded.
pub fn increase_level(store: &Store, player: PlayerId, delta: u32) -> VelvetResult<u32> {
    let current = store
        .player_by_id(player)?
        .ok_or(VelvetError::PlayerNotFound(player))?;
    let new_level = progression::raised(current.level, delta);
    store.set_player_level(player, new_level)?;
    Ok(new_level)
}
