//! Domain model for the FD tracker core.
//!
//! # Responsibility
//! - Define the canonical fixed-deposit record used by core business logic.
//!
//! # Invariants
//! - Record identity for equality purposes is full structural equality,
//!   not just `id`.

pub mod deposit;
