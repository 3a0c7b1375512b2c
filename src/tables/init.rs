//! One-time setup of the process-wide lookup tables.
//!
//! Every table accessor initialises lazily, so calling [`init_tables`] is not
//! required for correctness. Binaries call it at startup so construction cost
//! is paid before the first search, and tests can call it to pin the
//! initialisation point. Repeated calls do nothing.

use crate::tables::{attack_tables::attack_tables, zobrist};

pub fn init_tables() {
    let _ = attack_tables();
    zobrist::ensure_initialized();
    log::trace!("attack and zobrist tables ready");
}
