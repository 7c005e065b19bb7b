//! Ledger configuration loading from config.toml
//!
//! The library itself needs very little configuration: the names of the two
//! store collections, the fixed page size of the ledger table, and the
//! roster of organizational departments. Store credentials and project
//! identifiers belong to the surrounding application, not here.

use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::entities::entry::ALL_SCOPE_KEY;
use crate::errors::{Error, Result};

fn default_entries_collection() -> String {
    "budgetEntries".to_string()
}

fn default_overrides_collection() -> String {
    "budgetOverrides".to_string()
}

const fn default_page_size() -> usize {
    10
}

/// Configuration structure representing the ledger section of config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Collection holding the budget entry documents
    #[serde(default = "default_entries_collection")]
    pub entries_collection: String,
    /// Collection holding the scope-keyed override documents
    #[serde(default = "default_overrides_collection")]
    pub overrides_collection: String,
    /// Entries per ledger table page (also the public viewer's window size)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Roster of organizational-unit identifiers entries may belong to
    #[serde(default)]
    pub departments: Vec<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            entries_collection: default_entries_collection(),
            overrides_collection: default_overrides_collection(),
            page_size: default_page_size(),
            departments: Vec::new(),
        }
    }
}

impl LedgerConfig {
    /// Checks the configuration invariants.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the page size is zero, a department
    /// name is blank, or a department uses the reserved `"ALL"` scope key.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config {
                message: "page_size must be at least 1".to_string(),
            });
        }

        for name in &self.departments {
            if name.trim().is_empty() {
                return Err(Error::Config {
                    message: "department names cannot be blank".to_string(),
                });
            }
            if name == ALL_SCOPE_KEY {
                return Err(Error::Config {
                    message: format!(
                        "{ALL_SCOPE_KEY} is the reserved organization-wide scope key, \
                         not a department name"
                    ),
                });
            }
        }

        Ok(())
    }

    /// Whether `name` is in the configured department roster.
    #[must_use]
    pub fn is_department(&self, name: &str) -> bool {
        self.departments.iter().any(|d| d == name)
    }
}

/// Loads and validates the ledger configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A configuration invariant is violated
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LedgerConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let config: LedgerConfig = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;

    info!(
        "Loaded ledger configuration: {} departments, page size {}",
        config.departments.len(),
        config.page_size
    );
    Ok(config)
}

/// Loads the ledger configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<LedgerConfig> {
    load_config("config.toml")
}
