//! Ledger wiring: choose a store and build the handler state around it.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use tuckshop::domain::LedgerService;
use tuckshop::inbound::http::state::HttpState;
use tuckshop::outbound::memory::InMemoryLedgerStore;
use tuckshop::outbound::persistence::JsonFileLedgerStore;
use tuckshop::settings::LedgerSettings;

/// Build handler state backed by the store selected in `settings`.
///
/// # Errors
/// Returns the I/O error raised while creating or opening the data
/// directory.
pub fn build_http_state(settings: &LedgerSettings) -> io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = if settings.in_memory {
        info!("using in-memory ledger store; records will not survive a restart");
        HttpState::from(Arc::new(LedgerService::new(
            Arc::new(InMemoryLedgerStore::default()),
            clock,
        )))
    } else {
        let data_dir = settings.data_dir();
        let store = JsonFileLedgerStore::open(&data_dir).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("cannot open data directory {}: {err}", data_dir.display()),
            )
        })?;
        info!(data_dir = %data_dir.display(), "using JSON file ledger store");
        HttpState::from(Arc::new(LedgerService::new(Arc::new(store), clock)))
    };
    Ok(web::Data::new(state))
}
