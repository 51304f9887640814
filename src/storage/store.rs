use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::Expense;

/// Flat-file JSON persistence for the expense ledger.
///
/// The whole ledger lives in one file as a pretty-printed JSON array of
/// expense objects, overwritten wholesale on every save. A missing file is
/// an empty ledger; anything else that goes wrong is an error for the caller.
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full expense sequence. Returns an empty vector when the
    /// backing file does not exist.
    pub fn load(&self) -> Result<Vec<Expense>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read expense file: {}", self.path.display()))?;

        serde_json::from_str(&data)
            .with_context(|| format!("Malformed expense file: {}", self.path.display()))
    }

    /// Overwrite the backing file with the full expense sequence.
    pub fn save(&self, expenses: &[Expense]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(expenses)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write expense file: {}", self.path.display()))
    }
}
