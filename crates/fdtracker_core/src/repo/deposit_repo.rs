//! Fixed-deposit repository contract and SQLite store.
//!
//! # Responsibility
//! - Declare the operation set consumed by the use-case layer.
//! - Provide the durable SQLite-backed implementation.
//!
//! # Invariants
//! - Insert ignores the caller-supplied id and assigns a fresh monotonic
//!   one; ids are never reused within a store's lifetime (AUTOINCREMENT).
//! - Mutations write SQL first and only then refresh the live views, so a
//!   failed statement publishes nothing and a returned mutation is already
//!   visible to every view.
//! - `created_at` keeps its stored value across updates.

use crate::alarm::{AlarmScheduler, NoopAlarmScheduler};
use crate::db::DbError;
use crate::live::LiveView;
use crate::model::deposit::{DepositId, FixedDeposit};
use crate::repo::views::{DepositViews, Touched};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const DEPOSIT_SELECT_SQL: &str = "SELECT
    id,
    bank_name,
    principal_amount,
    maturity_amount,
    tenure_months,
    interest_rate,
    start_date,
    maturity_date,
    created_at,
    notes
FROM fixed_deposits";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure surfaced by deposit stores.
///
/// A missing id on update/delete is deliberately NOT an error: those
/// operations are silent no-ops.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying medium unavailable or a statement failed.
    Db(DbError),
    /// Persisted state cannot be decoded, or the connection was not
    /// migrated before constructing the store.
    Corrupted(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Corrupted(message) => write!(f, "corrupted deposit storage: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Corrupted(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Operation set the use-case layer depends on.
///
/// The SQLite store is the production implementation; the in-memory store
/// is a substitute with identical pre/post-conditions for tests.
pub trait FixedDepositRepository {
    /// Live view of every stored deposit, ordered by id.
    fn get_all_fixed_deposits(&self) -> LiveView<Vec<FixedDeposit>>;
    /// Live view of one deposit; `None` while absent or after deletion.
    fn get_fixed_deposit_by_id(&self, id: DepositId) -> LiveView<Option<FixedDeposit>>;
    /// Live sum of principal amounts; `None` when no deposits exist.
    fn get_total_invested_amount(&self) -> LiveView<Option<f64>>;
    /// Live sum of maturity amounts; `None` when no deposits exist.
    fn get_total_maturity_amount(&self) -> LiveView<Option<f64>>;
    /// Persists a new deposit and returns the assigned id.
    fn add_fixed_deposit(&self, deposit: &FixedDeposit) -> StoreResult<DepositId>;
    /// Replaces the stored deposit with the same id. No-op when missing.
    fn update_fixed_deposit(&self, deposit: &FixedDeposit) -> StoreResult<()>;
    /// Removes one deposit. No-op when missing.
    fn delete_fixed_deposit(&self, id: DepositId) -> StoreResult<()>;
    /// Removes every deposit.
    fn delete_all_fixed_deposits(&self) -> StoreResult<()>;
    /// Forwards to the alarm scheduler collaborator. Fire-and-forget.
    fn reschedule_alarms(&self);
}

/// SQLite-backed deposit store.
///
/// Owns its connection: all writes go through the store, which keeps the
/// published live views consistent with committed rows.
pub struct SqliteFixedDepositStore {
    conn: Connection,
    alarms: Arc<dyn AlarmScheduler>,
    views: DepositViews,
}

impl SqliteFixedDepositStore {
    /// Constructs a store over a migrated connection with no alarm wiring.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        Self::with_alarm_scheduler(conn, Arc::new(NoopAlarmScheduler))
    }

    /// Constructs a store forwarding `reschedule_alarms` to `alarms`.
    pub fn with_alarm_scheduler(
        conn: Connection,
        alarms: Arc<dyn AlarmScheduler>,
    ) -> StoreResult<Self> {
        ensure_schema_ready(&conn)?;
        let records = load_all_deposits(&conn)?;
        Ok(Self {
            conn,
            alarms,
            views: DepositViews::new(records),
        })
    }
}

impl std::fmt::Debug for SqliteFixedDepositStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteFixedDepositStore").finish_non_exhaustive()
    }
}

impl FixedDepositRepository for SqliteFixedDepositStore {
    fn get_all_fixed_deposits(&self) -> LiveView<Vec<FixedDeposit>> {
        self.views.all_view()
    }

    fn get_fixed_deposit_by_id(&self, id: DepositId) -> LiveView<Option<FixedDeposit>> {
        self.views.by_id_view(id)
    }

    fn get_total_invested_amount(&self) -> LiveView<Option<f64>> {
        self.views.invested_view()
    }

    fn get_total_maturity_amount(&self) -> LiveView<Option<f64>> {
        self.views.maturity_view()
    }

    fn add_fixed_deposit(&self, deposit: &FixedDeposit) -> StoreResult<DepositId> {
        self.conn.execute(
            "INSERT INTO fixed_deposits (
                bank_name,
                principal_amount,
                maturity_amount,
                tenure_months,
                interest_rate,
                start_date,
                maturity_date,
                created_at,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                deposit.bank_name.as_str(),
                deposit.principal_amount,
                deposit.maturity_amount,
                deposit.tenure_months,
                deposit.interest_rate,
                deposit.start_date,
                deposit.maturity_date,
                deposit.created_at,
                deposit.notes.as_deref(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        let mut records = self.views.snapshot();
        let mut stored = deposit.clone();
        stored.id = id;
        // Ids are monotonic, so appending keeps the snapshot id-ordered.
        records.push(stored);
        self.views.publish_snapshot(records, Touched::One(id));
        Ok(id)
    }

    fn update_fixed_deposit(&self, deposit: &FixedDeposit) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE fixed_deposits
             SET
                bank_name = ?1,
                principal_amount = ?2,
                maturity_amount = ?3,
                tenure_months = ?4,
                interest_rate = ?5,
                start_date = ?6,
                maturity_date = ?7,
                notes = ?8
             WHERE id = ?9;",
            params![
                deposit.bank_name.as_str(),
                deposit.principal_amount,
                deposit.maturity_amount,
                deposit.tenure_months,
                deposit.interest_rate,
                deposit.start_date,
                deposit.maturity_date,
                deposit.notes.as_deref(),
                deposit.id,
            ],
        )?;
        if changed == 0 {
            return Ok(());
        }

        let mut records = self.views.snapshot();
        if let Some(slot) = records.iter_mut().find(|record| record.id == deposit.id) {
            let created_at = slot.created_at;
            *slot = deposit.clone();
            slot.created_at = created_at;
        }
        self.views.publish_snapshot(records, Touched::One(deposit.id));
        Ok(())
    }

    fn delete_fixed_deposit(&self, id: DepositId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM fixed_deposits WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Ok(());
        }

        let mut records = self.views.snapshot();
        records.retain(|record| record.id != id);
        self.views.publish_snapshot(records, Touched::One(id));
        Ok(())
    }

    fn delete_all_fixed_deposits(&self) -> StoreResult<()> {
        self.conn.execute("DELETE FROM fixed_deposits;", [])?;
        self.views.publish_snapshot(Vec::new(), Touched::All);
        Ok(())
    }

    fn reschedule_alarms(&self) {
        debug!("event=reschedule_alarms module=repo status=ok");
        self.alarms.reschedule_alarms();
    }
}

fn ensure_schema_ready(conn: &Connection) -> StoreResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type = 'table' AND name = 'fixed_deposits'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(StoreError::Corrupted(
            "fixed_deposits table missing; connection was not migrated".to_string(),
        ));
    }
    Ok(())
}

fn load_all_deposits(conn: &Connection) -> StoreResult<Vec<FixedDeposit>> {
    let mut stmt = conn.prepare(&format!("{DEPOSIT_SELECT_SQL} ORDER BY id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(decode_deposit_row(row)?);
    }
    Ok(records)
}

fn decode_deposit_row(row: &Row<'_>) -> StoreResult<FixedDeposit> {
    let tenure_raw: i64 = row.get("tenure_months")?;
    let tenure_months = u32::try_from(tenure_raw).map_err(|_| {
        StoreError::Corrupted(format!(
            "invalid tenure value `{tenure_raw}` in fixed_deposits.tenure_months"
        ))
    })?;

    Ok(FixedDeposit {
        id: row.get("id")?,
        bank_name: row.get("bank_name")?,
        principal_amount: row.get("principal_amount")?,
        maturity_amount: row.get("maturity_amount")?,
        tenure_months,
        interest_rate: row.get("interest_rate")?,
        start_date: row.get("start_date")?,
        maturity_date: row.get("maturity_date")?,
        created_at: row.get("created_at")?,
        notes: row.get("notes")?,
    })
}
