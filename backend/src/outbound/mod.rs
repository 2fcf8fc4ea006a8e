//! Outbound adapters implementing the [`LedgerStore`] driven port.
//!
//! - **memory**: process-local store for tests and ephemeral runs.
//! - **persistence**: JSON files in a data directory.
//!
//! [`LedgerStore`]: crate::domain::ports::LedgerStore

pub mod memory;
pub mod persistence;
