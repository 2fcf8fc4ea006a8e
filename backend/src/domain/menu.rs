//! Menu partitions and the persisted record keys derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Independent data scope with its own balances and catalogue.
///
/// Both menus run the same ledger engine; the transaction log is shared and
/// each record carries the menu it was placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Menu {
    /// General sales menu.
    General,
    /// Team-only menu.
    Team,
}

impl Menu {
    /// Every menu, in a stable order.
    pub const ALL: [Self; 2] = [Self::General, Self::Team];

    /// Lower-case wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string names no known menu.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown menu: {0}")]
pub struct ParseMenuError(pub String);

impl FromStr for Menu {
    type Err = ParseMenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "team" => Ok(Self::Team),
            other => Err(ParseMenuError(other.to_owned())),
        }
    }
}

/// Name of one persisted record in the ledger store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// `balances:<menu>`
    Balances(Menu),
    /// `catalogue:<menu>`
    Catalogue(Menu),
    /// The shared transaction log.
    Transactions,
}

impl RecordKey {
    /// File name used by file-backed stores.
    ///
    /// # Examples
    /// ```
    /// use tuckshop::domain::{Menu, RecordKey};
    ///
    /// assert_eq!(RecordKey::Balances(Menu::Team).file_name(), "balances-team.json");
    /// assert_eq!(RecordKey::Transactions.file_name(), "transactions.json");
    /// ```
    pub fn file_name(self) -> String {
        match self {
            Self::Balances(menu) => format!("balances-{menu}.json"),
            Self::Catalogue(menu) => format!("catalogue-{menu}.json"),
            Self::Transactions => "transactions.json".to_owned(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Balances(menu) => write!(f, "balances:{menu}"),
            Self::Catalogue(menu) => write!(f, "catalogue:{menu}"),
            Self::Transactions => f.write_str("transactions"),
        }
    }
}
