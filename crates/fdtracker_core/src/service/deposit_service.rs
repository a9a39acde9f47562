//! Fixed-deposit use-case service.
//!
//! # Responsibility
//! - Provide one stable method per business action for core callers.
//! - Delegate every call to the repository unchanged.
//!
//! # Invariants
//! - No business logic beyond parameter forwarding lives here; callers
//!   test against a substitute repository through the same methods.

use crate::live::LiveView;
use crate::model::deposit::{DepositId, FixedDeposit};
use crate::repo::deposit_repo::{FixedDepositRepository, StoreResult};

/// Use-case façade over a deposit repository implementation.
pub struct DepositService<R: FixedDepositRepository> {
    repo: R,
}

impl<R: FixedDepositRepository> DepositService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Live view of every stored deposit.
    pub fn get_all_fixed_deposits(&self) -> LiveView<Vec<FixedDeposit>> {
        self.repo.get_all_fixed_deposits()
    }

    /// Live view of one deposit by id.
    pub fn get_fixed_deposit_by_id(&self, id: DepositId) -> LiveView<Option<FixedDeposit>> {
        self.repo.get_fixed_deposit_by_id(id)
    }

    /// Live total of invested principal; `None` without deposits.
    pub fn get_total_invested_amount(&self) -> LiveView<Option<f64>> {
        self.repo.get_total_invested_amount()
    }

    /// Live total of maturity value; `None` without deposits.
    pub fn get_total_maturity_amount(&self) -> LiveView<Option<f64>> {
        self.repo.get_total_maturity_amount()
    }

    /// Stores a new deposit and returns its assigned id.
    pub fn add_fixed_deposit(&self, deposit: &FixedDeposit) -> StoreResult<DepositId> {
        self.repo.add_fixed_deposit(deposit)
    }

    /// Replaces an existing deposit by id.
    pub fn update_fixed_deposit(&self, deposit: &FixedDeposit) -> StoreResult<()> {
        self.repo.update_fixed_deposit(deposit)
    }

    /// Removes one deposit by id.
    pub fn delete_fixed_deposit(&self, id: DepositId) -> StoreResult<()> {
        self.repo.delete_fixed_deposit(id)
    }

    /// Removes every deposit.
    pub fn delete_all_fixed_deposits(&self) -> StoreResult<()> {
        self.repo.delete_all_fixed_deposits()
    }

    /// Asks the scheduler collaborator to rebuild maturity alarms.
    pub fn reschedule_alarms(&self) {
        self.repo.reschedule_alarms()
    }
}
