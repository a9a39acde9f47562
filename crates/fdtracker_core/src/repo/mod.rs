//! Repository layer: data access contract and store implementations.
//!
//! # Responsibility
//! - Define the operation set the use-case layer depends on.
//! - Keep SQL details inside the persistence boundary.
//! - Maintain the live views derived from stored deposits.
//!
//! # Invariants
//! - Every mutating operation updates the live views before returning, so
//!   no view can observe a state older than the last completed mutation.
//! - Failed mutations publish nothing.
//! - Update and delete on a missing id are silent no-ops, not errors.

pub mod deposit_repo;
pub mod memory_repo;
mod views;
