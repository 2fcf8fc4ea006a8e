//! HTTP server configuration object.

use std::net::SocketAddr;

use tuckshop::settings::LedgerSettings;

/// Listener configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Derive the listener configuration from ledger settings.
    ///
    /// # Errors
    /// Returns [`std::io::ErrorKind::InvalidInput`] when the bind address is
    /// malformed.
    pub fn from_settings(settings: &LedgerSettings) -> std::io::Result<Self> {
        settings
            .bind_addr()
            .map(Self::new)
            .map_err(|err| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid bind address: {err}"),
                )
            })
    }
}
