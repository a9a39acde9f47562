//! Core use-case services.
//!
//! # Responsibility
//! - Expose one entry point per business action over the repository
//!   contract.
//! - Keep UI callers decoupled from storage details.

pub mod deposit_service;
