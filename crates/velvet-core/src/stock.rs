//! Stock operations: the live set of personas a player owns.
//!
//! The stock is bounded by the player's capacity and is always derived
//! from persona ownership, never cached. Summoning draws a random
//! level-appropriate persona from the catalog pool; release returns a
//! persona to the pool. Selection by list position re-queries the
//! stock in listing order, so positions stay valid within one
//! single-threaded interaction.

use rand::Rng;
use rand::rngs::StdRng;

use crate::catalog::Catalog;
use crate::error::VelvetResult;
use crate::model::{Persona, PersonaId, Player, PlayerId, StockEntry};
use crate::outcome::{Outcome, Rejection};
use crate::progression::{self, LEVEL_MIN, SUMMON_REWARD};
use crate::store::Store;

/// The player's stock joined with arcana names, ordered by persona id.
pub fn list(store: &Store, player: PlayerId) -> VelvetResult<Vec<StockEntry>> {
    store.stock(player)
}

/// Number of personas in the player's stock.
pub fn count(store: &Store, player: PlayerId) -> VelvetResult<u32> {
    store.stock_count(player)
}

/// Whether the stock has reached the player's capacity.
pub fn is_full(store: &Store, player: &Player) -> VelvetResult<bool> {
    Ok(store.stock_count(player.id)? >= player.stock_capacity)
}

/// The n-th entry (1-based) of the current stock listing, or `None`
/// if the position is out of range.
pub fn entry_by_number(
    store: &Store,
    player: PlayerId,
    number: usize,
) -> VelvetResult<Option<StockEntry>> {
    let listing = store.stock(player)?;
    if number == 0 {
        return Ok(None);
    }
    Ok(listing.into_iter().nth(number - 1))
}

/// Summon a random level-appropriate persona into the player's stock.
///
/// Capacity is checked before the catalog is consulted. Level-1
/// players always draw from personas at exactly level 1; everyone else
/// draws from the ±3 window around their level. The pool never
/// contains a persona anyone already owns, and the final claim is
/// guarded inside the store transaction, so a persona cannot be
/// assigned twice.
pub fn summon(
    store: &mut Store,
    player: &Player,
    rng: &mut StdRng,
) -> VelvetResult<Outcome<Persona>> {
    if is_full(store, player)? {
        return Ok(Outcome::Rejected(Rejection::StockFull));
    }

    let owned: Vec<PersonaId> = store
        .stock_personas(player.id)?
        .iter()
        .map(|p| p.id)
        .collect();
    // New players always get a level-1 persona.
    let window = if player.level == LEVEL_MIN {
        LEVEL_MIN..=LEVEL_MIN
    } else {
        progression::level_window(player.level)
    };

    let pool: Vec<Persona> = Catalog::new(store)
        .personas_in_level_range(window, &[], &owned)?
        .into_iter()
        .filter(|p| p.owner.is_none())
        .collect();
    if pool.is_empty() {
        return Ok(Outcome::Rejected(Rejection::NoCandidate));
    }

    let pick = pool[rng.random_range(0..pool.len())].clone();
    let new_level = progression::raised(player.level, SUMMON_REWARD);
    if store.commit_summon(player, pick.id, new_level)? {
        Ok(Outcome::Done(Persona {
            owner: Some(player.id),
            ..pick
        }))
    } else {
        // Lost the claim between query and commit; nothing was consumed.
        Ok(Outcome::Rejected(Rejection::NoCandidate))
    }
}

/// Release a persona from the player's stock by id, returning it to
/// the catalog pool.
pub fn release(
    store: &Store,
    player: PlayerId,
    persona: PersonaId,
) -> VelvetResult<Outcome<Persona>> {
    let Some(target) = store.persona_by_id(persona)? else {
        return Ok(Outcome::Rejected(Rejection::NotInStock));
    };
    if !store.release_persona(player, persona)? {
        return Ok(Outcome::Rejected(Rejection::NotInStock));
    }
    Ok(Outcome::Done(Persona {
        owner: None,
        ..target
    }))
}
