//! JSON file-backed ledger store.
//!
//! Each record lives in its own pretty-printed JSON file inside the data
//! directory:
//!
//! | record                | file                     |
//! |-----------------------|--------------------------|
//! | general balances      | `balances-general.json`  |
//! | team balances         | `balances-team.json`     |
//! | general catalogue     | `catalogue-general.json` |
//! | team catalogue        | `catalogue-team.json`    |
//! | transaction log       | `transactions.json`      |
//!
//! Missing or zero-length files load as empty records. File access runs on
//! the blocking pool.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::atomic_io::write_atomic;
use crate::domain::ports::{LedgerStore, LedgerStoreError};
use crate::domain::{Balances, Catalogue, Menu, RecordKey, Transaction};

/// [`LedgerStore`] that persists each record as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileLedgerStore {
    dir: Arc<Dir>,
}

impl JsonFileLedgerStore {
    /// Open `path` as the data directory, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while creating or opening the directory.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir: Arc::new(dir) })
    }

    async fn load<T>(&self, key: RecordKey) -> Result<T, LedgerStoreError>
    where
        T: DeserializeOwned + Default + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || read_record(&dir, key))
            .await
            .map_err(|err| LedgerStoreError::io(key.to_string(), err.to_string()))?
    }

    async fn save<T>(&self, key: RecordKey, record: &T) -> Result<(), LedgerStoreError>
    where
        T: Serialize + ?Sized,
    {
        let mut contents = serde_json::to_vec_pretty(record)
            .map_err(|err| LedgerStoreError::corrupt(key.to_string(), err.to_string()))?;
        contents.push(b'\n');
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || write_atomic(&dir, &key.file_name(), &contents))
            .await
            .map_err(|err| LedgerStoreError::io(key.to_string(), err.to_string()))?
            .map_err(|err| LedgerStoreError::io(key.to_string(), err.to_string()))?;
        debug!(record = %key, "ledger record written");
        Ok(())
    }
}

fn read_record<T>(dir: &Dir, key: RecordKey) -> Result<T, LedgerStoreError>
where
    T: DeserializeOwned + Default,
{
    let bytes = match dir.read(key.file_name()) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(err) => return Err(LedgerStoreError::io(key.to_string(), err.to_string())),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(&bytes)
        .map_err(|err| LedgerStoreError::corrupt(key.to_string(), err.to_string()))
}

#[async_trait]
impl LedgerStore for JsonFileLedgerStore {
    async fn load_balances(&self, menu: Menu) -> Result<Balances, LedgerStoreError> {
        self.load(RecordKey::Balances(menu)).await
    }

    async fn save_balances(
        &self,
        menu: Menu,
        balances: &Balances,
    ) -> Result<(), LedgerStoreError> {
        self.save(RecordKey::Balances(menu), balances).await
    }

    async fn load_catalogue(&self, menu: Menu) -> Result<Catalogue, LedgerStoreError> {
        self.load(RecordKey::Catalogue(menu)).await
    }

    async fn save_catalogue(
        &self,
        menu: Menu,
        catalogue: &Catalogue,
    ) -> Result<(), LedgerStoreError> {
        self.save(RecordKey::Catalogue(menu), catalogue).await
    }

    async fn load_transactions(&self) -> Result<Vec<Transaction>, LedgerStoreError> {
        self.load(RecordKey::Transactions).await
    }

    async fn save_transactions(&self, log: &[Transaction]) -> Result<(), LedgerStoreError> {
        self.save(RecordKey::Transactions, log).await
    }
}
