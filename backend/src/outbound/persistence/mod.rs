//! File-backed persistence adapters.
//!
//! Adapters translate between domain records and their on-disk JSON form and
//! contain no ledger logic. Writes go through [`atomic_io`] so a crash never
//! leaves a half-written record.

mod atomic_io;
mod json_file_store;

pub use json_file_store::JsonFileLedgerStore;
