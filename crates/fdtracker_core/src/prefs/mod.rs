//! User preference flags with live-view subscriptions.
//!
//! # Responsibility
//! - Store boolean preference flags keyed by name, independently from the
//!   deposit tables.
//! - Expose the same live-view contract as the deposit store, keyed by
//!   preference name.
//!
//! # Invariants
//! - An unset flag reads as `false`.
//! - Flags are independent: writing one never emits on another.
//! - A write publishes only after the row is committed, in write order.

use crate::live::{LiveSource, LiveView};
use crate::repo::deposit_repo::{StoreError, StoreResult};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::collections::HashMap;

/// Toggles the dark UI theme.
pub const DARK_MODE: &str = "dark_mode";
/// Toggles wallpaper-derived dynamic colors.
pub const DYNAMIC_COLOR: &str = "dynamic_color";
/// Gates the app behind biometric unlock.
pub const BIOMETRIC_AUTH: &str = "biometric_auth";

/// Key→boolean preference store over its own SQLite connection.
///
/// Deliberately separate from the deposit store: preference data is not
/// financially derived and has its own lifecycle.
#[derive(Debug)]
pub struct PreferenceStore {
    conn: Connection,
    flags: Mutex<HashMap<String, LiveSource<bool>>>,
}

impl PreferenceStore {
    /// Constructs a store over a migrated connection, loading every
    /// persisted flag.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_schema_ready(&conn)?;

        let mut flags = HashMap::new();
        {
            let mut stmt = conn.prepare("SELECT name, value FROM preferences;")?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let name: String = row.get(0)?;
                let value: i64 = row.get(1)?;
                flags.insert(name, LiveSource::new(value != 0));
            }
        }

        Ok(Self {
            conn,
            flags: Mutex::new(flags),
        })
    }

    /// Live view of one flag. Reads `false` while the flag was never set.
    pub fn flag(&self, name: &str) -> LiveView<bool> {
        let mut flags = self.flags.lock();
        flags
            .entry(name.to_string())
            .or_insert_with(|| LiveSource::new(false))
            .view()
    }

    /// Persists `value` under `name` and publishes it to subscribers.
    pub fn set_flag(&self, name: &str, value: bool) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (name, value) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value;",
            params![name, i64::from(value)],
        )?;

        let mut flags = self.flags.lock();
        flags
            .entry(name.to_string())
            .or_insert_with(|| LiveSource::new(false))
            .publish(value);
        Ok(())
    }
}

fn ensure_schema_ready(conn: &Connection) -> StoreResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type = 'table' AND name = 'preferences'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(StoreError::Corrupted(
            "preferences table missing; connection was not migrated".to_string(),
        ));
    }
    Ok(())
}
