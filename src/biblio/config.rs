use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BOOKS_FILE: &str = "library_books.json";
const DEFAULT_BORROWERS_FILE: &str = "library_borrowers.json";

/// Configuration for biblio, stored in `<data-dir>/config.json`.
///
/// Keeps the persisted file names explicit instead of burying them as
/// process-wide constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BiblioConfig {
    /// File name of the books document inside the data directory
    #[serde(default = "default_books_file")]
    pub books_file: String,

    /// File name of the borrowers document inside the data directory
    #[serde(default = "default_borrowers_file")]
    pub borrowers_file: String,
}

fn default_books_file() -> String {
    DEFAULT_BOOKS_FILE.to_string()
}

fn default_borrowers_file() -> String {
    DEFAULT_BORROWERS_FILE.to_string()
}

impl Default for BiblioConfig {
    fn default() -> Self {
        Self {
            books_file: DEFAULT_BOOKS_FILE.to_string(),
            borrowers_file: DEFAULT_BORROWERS_FILE.to_string(),
        }
    }
}

impl BiblioConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: BiblioConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }
}
