//! SQLite-backed relational store.
//!
//! All SQL lives in this module; the rest of the crate works with the
//! typed rows from [`crate::model`]. The stock is never materialized
//! anywhere: it is always the live set of personas whose
//! `owner_player_id` equals a given player, so there is exactly one
//! source of truth for ownership.
//!
//! Multi-step mutations (claiming a summoned persona, the three
//! ownership changes of a fusion) run inside a single transaction with
//! ownership guards, so a persona can never end up with two owners
//! even if the database is shared.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::error::VelvetResult;
use crate::model::{Arcana, ArcanaId, Persona, PersonaId, Player, PlayerId, StockEntry};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS arcanas (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS players (
    id             INTEGER PRIMARY KEY,
    name           TEXT NOT NULL UNIQUE,
    level          INTEGER NOT NULL DEFAULT 1,
    stock_capacity INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS personas (
    id              INTEGER PRIMARY KEY,
    name            TEXT NOT NULL,
    level           INTEGER NOT NULL,
    arcana_id       INTEGER NOT NULL REFERENCES arcanas(id),
    owner_player_id INTEGER REFERENCES players(id)
);
CREATE INDEX IF NOT EXISTS idx_personas_owner ON personas(owner_player_id);
";

const PERSONA_COLUMNS: &str = "id, name, level, arcana_id, owner_player_id";

/// Handle to the game database. Owns one connection; the game is
/// single-user and synchronous, so no pooling is needed.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if necessary) a store at the given path.
    pub fn open(path: &Path) -> VelvetResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a fresh in-memory store. Used by tests and throwaway runs.
    pub fn open_in_memory() -> VelvetResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> VelvetResult<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // -----------------------------------------------------------------------
    // Arcanas
    // -----------------------------------------------------------------------

    /// Insert an arcana. Seeding only; arcanas are immutable afterwards.
    pub fn insert_arcana(&self, name: &str) -> VelvetResult<Arcana> {
        self.conn
            .execute("INSERT INTO arcanas (name) VALUES (?1)", params![name])?;
        Ok(Arcana {
            id: ArcanaId(self.conn.last_insert_rowid()),
            name: name.to_string(),
        })
    }

    /// All arcanas, in id order.
    pub fn arcanas(&self) -> VelvetResult<Vec<Arcana>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM arcanas ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Arcana {
                id: ArcanaId(row.get(0)?),
                name: row.get(1)?,
            })
        })?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    /// Point lookup of one arcana.
    pub fn arcana_by_id(&self, id: ArcanaId) -> VelvetResult<Option<Arcana>> {
        self.conn
            .query_row(
                "SELECT id, name FROM arcanas WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok(Arcana {
                        id: ArcanaId(row.get(0)?),
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    // -----------------------------------------------------------------------
    // Personas
    // -----------------------------------------------------------------------

    /// Insert an unowned persona. Seeding only.
    pub fn insert_persona(&self, name: &str, level: u32, arcana: ArcanaId) -> VelvetResult<Persona> {
        self.conn.execute(
            "INSERT INTO personas (name, level, arcana_id) VALUES (?1, ?2, ?3)",
            params![name, level, arcana.0],
        )?;
        Ok(Persona {
            id: PersonaId(self.conn.last_insert_rowid()),
            name: name.to_string(),
            level,
            arcana_id: arcana,
            owner: None,
        })
    }

    /// Point lookup of one persona.
    pub fn persona_by_id(&self, id: PersonaId) -> VelvetResult<Option<Persona>> {
        let sql = format!("SELECT {PERSONA_COLUMNS} FROM personas WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id.0], persona_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// All personas of one arcana, by level then name.
    pub fn personas_by_arcana(&self, arcana: ArcanaId) -> VelvetResult<Vec<Persona>> {
        let sql = format!(
            "SELECT {PERSONA_COLUMNS} FROM personas WHERE arcana_id = ?1 ORDER BY level, name"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![arcana.0], persona_from_row)?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    /// Range scan over the catalog: personas with level in the
    /// inclusive range, skipping the given arcanas and persona ids.
    pub fn personas_in_level_range(
        &self,
        min_level: u32,
        max_level: u32,
        exclude_arcanas: &[ArcanaId],
        exclude_ids: &[PersonaId],
    ) -> VelvetResult<Vec<Persona>> {
        let mut sql =
            format!("SELECT {PERSONA_COLUMNS} FROM personas WHERE level BETWEEN ? AND ?");
        let mut bindings: Vec<Value> = vec![
            Value::from(i64::from(min_level)),
            Value::from(i64::from(max_level)),
        ];

        if !exclude_arcanas.is_empty() {
            sql.push_str(" AND arcana_id NOT IN (");
            sql.push_str(&placeholders(exclude_arcanas.len()));
            sql.push(')');
            bindings.extend(exclude_arcanas.iter().map(|a| Value::from(a.0)));
        }
        if !exclude_ids.is_empty() {
            sql.push_str(" AND id NOT IN (");
            sql.push_str(&placeholders(exclude_ids.len()));
            sql.push(')');
            bindings.extend(exclude_ids.iter().map(|p| Value::from(p.0)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bindings), persona_from_row)?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Insert a new player at level 1.
    pub fn insert_player(&self, name: &str, stock_capacity: u32) -> VelvetResult<Player> {
        self.conn.execute(
            "INSERT INTO players (name, level, stock_capacity) VALUES (?1, 1, ?2)",
            params![name, stock_capacity],
        )?;
        Ok(Player {
            id: PlayerId(self.conn.last_insert_rowid()),
            name: name.to_string(),
            level: 1,
            stock_capacity,
        })
    }

    /// Look up a player by name.
    pub fn player_by_name(&self, name: &str) -> VelvetResult<Option<Player>> {
        self.conn
            .query_row(
                "SELECT id, name, level, stock_capacity FROM players WHERE name = ?1",
                params![name],
                player_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Look up a player by id.
    pub fn player_by_id(&self, id: PlayerId) -> VelvetResult<Option<Player>> {
        self.conn
            .query_row(
                "SELECT id, name, level, stock_capacity FROM players WHERE id = ?1",
                params![id.0],
                player_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Overwrite a player's level.
    pub fn set_player_level(&self, id: PlayerId, level: u32) -> VelvetResult<()> {
        self.conn.execute(
            "UPDATE players SET level = ?1 WHERE id = ?2",
            params![level, id.0],
        )?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Stock (live ownership queries)
    // -----------------------------------------------------------------------

    /// The player's stock joined with arcana names, in the stable
    /// listing order (persona id ascending).
    pub fn stock(&self, player: PlayerId) -> VelvetResult<Vec<StockEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT personas.id, personas.name, personas.level, arcanas.name
             FROM personas JOIN arcanas ON personas.arcana_id = arcanas.id
             WHERE personas.owner_player_id = ?1
             ORDER BY personas.id",
        )?;
        let rows = stmt.query_map(params![player.0], |row| {
            Ok(StockEntry {
                persona_id: PersonaId(row.get(0)?),
                name: row.get(1)?,
                level: row.get(2)?,
                arcana_name: row.get(3)?,
            })
        })?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    /// The personas the player owns, in listing order.
    pub fn stock_personas(&self, player: PlayerId) -> VelvetResult<Vec<Persona>> {
        let sql = format!(
            "SELECT {PERSONA_COLUMNS} FROM personas WHERE owner_player_id = ?1 ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![player.0], persona_from_row)?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    /// How many personas the player owns.
    pub fn stock_count(&self, player: PlayerId) -> VelvetResult<u32> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM personas WHERE owner_player_id = ?1",
                params![player.0],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    /// Release one persona from the player's stock. Returns `false` if
    /// the persona was not owned by that player.
    pub fn release_persona(&self, player: PlayerId, persona: PersonaId) -> VelvetResult<bool> {
        let changed = self.conn.execute(
            "UPDATE personas SET owner_player_id = NULL
             WHERE id = ?1 AND owner_player_id = ?2",
            params![persona.0, player.0],
        )?;
        Ok(changed > 0)
    }

    // -----------------------------------------------------------------------
    // Atomic commits
    // -----------------------------------------------------------------------

    /// Commit a summon in one transaction: re-check capacity, claim the
    /// persona (only if still unowned), and set the player's level.
    /// Returns `false` and rolls back if any guard fails.
    pub fn commit_summon(
        &mut self,
        player: &Player,
        persona: PersonaId,
        new_level: u32,
    ) -> VelvetResult<bool> {
        let tx = self.conn.transaction()?;

        let count: u32 = tx.query_row(
            "SELECT COUNT(*) FROM personas WHERE owner_player_id = ?1",
            params![player.id.0],
            |row| row.get(0),
        )?;
        if count >= player.stock_capacity {
            return Ok(false);
        }

        let claimed = tx.execute(
            "UPDATE personas SET owner_player_id = ?1
             WHERE id = ?2 AND owner_player_id IS NULL",
            params![player.id.0, persona.0],
        )?;
        if claimed == 0 {
            return Ok(false);
        }

        tx.execute(
            "UPDATE players SET level = ?1 WHERE id = ?2",
            params![new_level, player.id.0],
        )?;
        tx.commit()?;
        Ok(true)
    }

    /// Commit a fusion in one transaction: release both inputs (only if
    /// still owned by the player), claim the replacement (only if still
    /// unowned), and set the player's level. Returns `false` and rolls
    /// back if any guard fails, leaving every ownership untouched.
    pub fn commit_fusion(
        &mut self,
        player: PlayerId,
        first: PersonaId,
        second: PersonaId,
        replacement: PersonaId,
        new_level: u32,
    ) -> VelvetResult<bool> {
        let tx = self.conn.transaction()?;

        for input in [first, second] {
            let released = tx.execute(
                "UPDATE personas SET owner_player_id = NULL
                 WHERE id = ?1 AND owner_player_id = ?2",
                params![input.0, player.0],
            )?;
            if released == 0 {
                return Ok(false);
            }
        }

        let claimed = tx.execute(
            "UPDATE personas SET owner_player_id = ?1
             WHERE id = ?2 AND owner_player_id IS NULL",
            params![player.0, replacement.0],
        )?;
        if claimed == 0 {
            return Ok(false);
        }

        tx.execute(
            "UPDATE players SET level = ?1 WHERE id = ?2",
            params![new_level, player.0],
        )?;
        tx.commit()?;
        Ok(true)
    }
}

fn persona_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Persona> {
    Ok(Persona {
        id: PersonaId(row.get(0)?),
        name: row.get(1)?,
        level: row.get(2)?,
        arcana_id: ArcanaId(row.get(3)?),
        owner: row.get::<_, Option<i64>>(4)?.map(PlayerId),
    })
}

fn player_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: PlayerId(row.get(0)?),
        name: row.get(1)?,
        level: row.get(2)?,
        stock_capacity: row.get(3)?,
    })
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
