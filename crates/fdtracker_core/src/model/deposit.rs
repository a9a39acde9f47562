//! Fixed-deposit domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted and projected by the store.
//! - Provide derived helpers over amount and date fields.
//!
//! # Invariants
//! - `id` is assigned by the store on insert; callers create records with
//!   [`UNASSIGNED_DEPOSIT_ID`].
//! - `created_at` is set once at record creation and is never changed by
//!   updates.
//! - Absent `notes` is represented as `None`, never as an empty string.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned integer identifier for a fixed deposit.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type DepositId = i64;

/// Sentinel id carried by records that have not been stored yet.
///
/// The store ignores the caller-supplied id on insert and assigns a fresh
/// monotonic one.
pub const UNASSIGNED_DEPOSIT_ID: DepositId = 0;

/// A single fixed-deposit investment entry.
///
/// Amounts are plain decimal values in the user's currency; the core does
/// not convert or format them. Whether `maturity_amount` actually exceeds
/// `principal_amount` is caller-side policy and is not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDeposit {
    /// Store-assigned id, unique across all live records.
    pub id: DepositId,
    /// Display label of the issuing bank. Expected non-empty.
    pub bank_name: String,
    /// Invested amount. Non-negative, fractional values allowed.
    pub principal_amount: f64,
    /// Amount paid out at maturity.
    pub maturity_amount: f64,
    /// Deposit term in months.
    pub tenure_months: u32,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    /// Day the deposit was opened.
    pub start_date: NaiveDate,
    /// Day the deposit pays out. Day granularity; no time-of-day meaning.
    pub maturity_date: NaiveDate,
    /// Creation timestamp, immutable after the record is first built.
    pub created_at: DateTime<Utc>,
    /// Free-form user notes. `None` when the user entered nothing.
    pub notes: Option<String>,
}

impl FixedDeposit {
    /// Creates an unstored record with [`UNASSIGNED_DEPOSIT_ID`] and the
    /// current time as `created_at`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bank_name: impl Into<String>,
        principal_amount: f64,
        maturity_amount: f64,
        tenure_months: u32,
        interest_rate: f64,
        start_date: NaiveDate,
        maturity_date: NaiveDate,
    ) -> Self {
        Self {
            id: UNASSIGNED_DEPOSIT_ID,
            bank_name: bank_name.into(),
            principal_amount,
            maturity_amount,
            tenure_months,
            interest_rate,
            start_date,
            maturity_date,
            created_at: Utc::now(),
            notes: None,
        }
    }

    /// Attaches user notes to the record.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Interest gained over the full term (`maturity - principal`).
    pub fn interest_earned(&self) -> f64 {
        self.maturity_amount - self.principal_amount
    }

    /// Whether the deposit has paid out as of `on` (day granularity).
    pub fn has_matured(&self, on: NaiveDate) -> bool {
        self.maturity_date <= on
    }

    /// Whole days remaining until maturity; negative once matured.
    pub fn days_until_maturity(&self, from: NaiveDate) -> i64 {
        (self.maturity_date - from).num_days()
    }
}
