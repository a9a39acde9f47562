//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `fdtracker_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use fdtracker_core::db::open_db_in_memory;
use fdtracker_core::{FixedDepositRepository, SqliteFixedDepositStore};

fn main() {
    println!("fdtracker_core version={}", fdtracker_core::core_version());

    // Open a throwaway database end to end so a broken schema or store
    // bootstrap shows up here instead of inside a UI host.
    let store = open_db_in_memory()
        .map_err(|err| err.to_string())
        .and_then(|conn| SqliteFixedDepositStore::try_new(conn).map_err(|err| err.to_string()));

    match store {
        Ok(store) => {
            let deposits = store.get_all_fixed_deposits().get();
            println!("fdtracker_core store=ok deposits={}", deposits.len());
        }
        Err(err) => {
            eprintln!("fdtracker_core store=error {err}");
            std::process::exit(1);
        }
    }
}
