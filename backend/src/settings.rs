//! Ledger server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TUCKSHOP_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Configuration for the ledger server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TUCKSHOP")]
pub struct LedgerSettings {
    /// Directory holding the JSON ledger records.
    pub data_dir: Option<PathBuf>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Keep records in memory instead of on disk.
    #[ortho_config(default = false)]
    pub in_memory: bool,
}

impl LedgerSettings {
    /// Configured data directory, falling back to `./data`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Configured listen address, falling back to `0.0.0.0:3000`.
    ///
    /// # Errors
    /// Returns the parse error when the configured address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }
}
