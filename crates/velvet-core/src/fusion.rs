//! The fusion engine: consume two cross-arcana personas for a new one.
//!
//! Validation runs in full before any ownership change, and the swap
//! itself (release two, claim one) is a single store transaction, so a
//! fusion either happens completely or not at all. Net stock size
//! decreases by one on success.

use rand::Rng;
use rand::rngs::StdRng;

use crate::catalog::Catalog;
use crate::error::VelvetResult;
use crate::model::{Persona, PersonaId, Player};
use crate::outcome::{Outcome, Rejection};
use crate::progression::{self, FUSION_REWARD};
use crate::store::Store;

/// Fuse two personas from the player's stock.
///
/// Both inputs must be owned by the player and belong to different
/// arcanas. The replacement is drawn uniformly at random from catalog
/// personas of a third arcana within the ±3 window around the player's
/// level, skipping anything the player already owns. On success both
/// inputs return to the pool, the replacement joins the stock, and the
/// player level rises by 3 (capped at 99).
pub fn fuse(
    store: &mut Store,
    player: &Player,
    first: PersonaId,
    second: PersonaId,
    rng: &mut StdRng,
) -> VelvetResult<Outcome<Persona>> {
    let Some(a) = store.persona_by_id(first)? else {
        return Ok(Outcome::Rejected(Rejection::NotInStock));
    };
    let Some(b) = store.persona_by_id(second)? else {
        return Ok(Outcome::Rejected(Rejection::NotInStock));
    };
    if !a.is_owned_by(player.id) || !b.is_owned_by(player.id) {
        return Ok(Outcome::Rejected(Rejection::NotInStock));
    }
    if a.arcana_id == b.arcana_id {
        return Ok(Outcome::Rejected(Rejection::SameArcana));
    }

    let owned: Vec<PersonaId> = store
        .stock_personas(player.id)?
        .iter()
        .map(|p| p.id)
        .collect();
    let pool: Vec<Persona> = Catalog::new(store)
        .personas_in_level_range(
            progression::level_window(player.level),
            &[a.arcana_id, b.arcana_id],
            &owned,
        )?
        .into_iter()
        .filter(|p| p.owner.is_none())
        .collect();
    if pool.is_empty() {
        return Ok(Outcome::Rejected(Rejection::NoCandidate));
    }

    let pick = pool[rng.random_range(0..pool.len())].clone();
    let new_level = progression::raised(player.level, FUSION_REWARD);
    if store.commit_fusion(player.id, first, second, pick.id, new_level)? {
        Ok(Outcome::Done(Persona {
            owner: Some(player.id),
            ..pick
        }))
    } else {
        // A guard failed mid-commit; the transaction rolled back.
        Ok(Outcome::Rejected(Rejection::NotInStock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::model::ArcanaId;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    struct Fixture {
        store: Store,
        player: Player,
        izanagi: Persona,
        jack_frost: Persona,
        pixie: Persona,
        fool: ArcanaId,
    }

    /// Ann at level 3 owning Izanagi (Fool) and Jack Frost (Magician),
    /// with Pixie (Priestess, level 3) free in the pool.
    fn fixture() -> Fixture {
        let mut store = Store::open_in_memory().unwrap();
        let fool = store.insert_arcana("Fool").unwrap();
        let magician = store.insert_arcana("Magician").unwrap();
        let priestess = store.insert_arcana("Priestess").unwrap();

        let izanagi = store.insert_persona("Izanagi", 1, fool.id).unwrap();
        let jack_frost = store.insert_persona("Jack Frost", 2, magician.id).unwrap();
        let pixie = store.insert_persona("Pixie", 3, priestess.id).unwrap();

        let player = store.insert_player("Ann", 8).unwrap();
        assert!(store.commit_summon(&player, izanagi.id, 2).unwrap());
        let player = store.player_by_id(player.id).unwrap().unwrap();
        assert!(store.commit_summon(&player, jack_frost.id, 3).unwrap());
        let player = store.player_by_id(player.id).unwrap().unwrap();

        Fixture {
            store,
            player,
            izanagi,
            jack_frost,
            pixie,
            fool: fool.id,
        }
    }

    #[test]
    fn successful_fusion_swaps_and_rewards() {
        let mut f = fixture();
        let fused = fuse(
            &mut f.store,
            &f.player,
            f.izanagi.id,
            f.jack_frost.id,
            &mut rng(),
        )
        .unwrap()
        .into_done()
        .unwrap();

        assert_eq!(fused.id, f.pixie.id);
        assert_eq!(fused.owner, Some(f.player.id));

        // Exactly the two inputs became unowned, exactly one persona joined.
        let store = &f.store;
        assert!(store.persona_by_id(f.izanagi.id).unwrap().unwrap().owner.is_none());
        assert!(store.persona_by_id(f.jack_frost.id).unwrap().unwrap().owner.is_none());
        assert_eq!(store.stock_count(f.player.id).unwrap(), 1);
        assert_eq!(store.player_by_id(f.player.id).unwrap().unwrap().level, 6);
    }

    #[test]
    fn same_arcana_is_rejected_without_mutation() {
        let mut f = fixture();
        let orpheus = f.store.insert_persona("Orpheus", 2, f.fool).unwrap();
        assert!(f.store.commit_summon(&f.player, orpheus.id, 3).unwrap());
        let player = f.store.player_by_id(f.player.id).unwrap().unwrap();

        let outcome = fuse(&mut f.store, &player, f.izanagi.id, orpheus.id, &mut rng()).unwrap();
        assert_eq!(outcome.rejection(), Some(Rejection::SameArcana));

        // Both inputs stay owned, the level is unchanged.
        assert_eq!(
            f.store.persona_by_id(f.izanagi.id).unwrap().unwrap().owner,
            Some(f.player.id)
        );
        assert_eq!(
            f.store.persona_by_id(orpheus.id).unwrap().unwrap().owner,
            Some(f.player.id)
        );
        assert_eq!(
            f.store.player_by_id(f.player.id).unwrap().unwrap().level,
            player.level
        );
    }

    #[test]
    fn inputs_must_be_in_stock() {
        let mut f = fixture();
        let outcome = fuse(
            &mut f.store,
            &f.player,
            f.izanagi.id,
            f.pixie.id, // free in the pool, not owned
            &mut rng(),
        )
        .unwrap();
        assert_eq!(outcome.rejection(), Some(Rejection::NotInStock));

        let outcome = fuse(
            &mut f.store,
            &f.player,
            f.izanagi.id,
            PersonaId(999),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(outcome.rejection(), Some(Rejection::NotInStock));
    }

    #[test]
    fn fusing_a_persona_with_itself_is_same_arcana() {
        let mut f = fixture();
        let outcome = fuse(
            &mut f.store,
            &f.player,
            f.izanagi.id,
            f.izanagi.id,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(outcome.rejection(), Some(Rejection::SameArcana));
    }

    #[test]
    fn no_candidate_when_third_arcana_missing() {
        let mut f = fixture();
        // Pixie is the only third-arcana persona; claim it for someone else.
        let ryu = f.store.insert_player("Ryu", 8).unwrap();
        assert!(f.store.commit_summon(&ryu, f.pixie.id, 2).unwrap());

        let outcome = fuse(
            &mut f.store,
            &f.player,
            f.izanagi.id,
            f.jack_frost.id,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(outcome.rejection(), Some(Rejection::NoCandidate));

        // No mutation happened.
        assert_eq!(f.store.stock_count(f.player.id).unwrap(), 2);
        assert_eq!(f.store.player_by_id(f.player.id).unwrap().unwrap().level, 3);
    }

    #[test]
    fn replacement_respects_level_window() {
        let mut f = fixture();
        // Add a far-off-level third-arcana persona; it must never be drawn.
        let priestess = f
            .store
            .arcanas()
            .unwrap()
            .into_iter()
            .find(|a| a.name == "Priestess")
            .unwrap();
        f.store.insert_persona("Scathach", 60, priestess.id).unwrap();

        let fused = fuse(
            &mut f.store,
            &f.player,
            f.izanagi.id,
            f.jack_frost.id,
            &mut rng(),
        )
        .unwrap()
        .into_done()
        .unwrap();
        assert_eq!(fused.name, "Pixie");
    }

    #[test]
    fn replacement_pool_excludes_owned_personas() {
        let mut f = fixture();
        // A second free third-arcana candidate, plus Pixie already in
        // Ann's stock: only the free one may be drawn.
        let priestess = f
            .store
            .arcanas()
            .unwrap()
            .into_iter()
            .find(|a| a.name == "Priestess")
            .unwrap();
        let apsaras = f.store.insert_persona("Apsaras", 3, priestess.id).unwrap();
        assert!(f.store.commit_summon(&f.player, f.pixie.id, 3).unwrap());
        let player = f.store.player_by_id(f.player.id).unwrap().unwrap();

        let fused = fuse(
            &mut f.store,
            &player,
            f.izanagi.id,
            f.jack_frost.id,
            &mut rng(),
        )
        .unwrap()
        .into_done()
        .unwrap();
        assert_eq!(fused.id, apsaras.id);
    }
}
