//! Path management for ledgerbook
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGERBOOK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/ledgerbook` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BookError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "LEDGERBOOK_DATA_DIR";

/// Manages all paths used by ledgerbook
#[derive(Debug, Clone)]
pub struct BookPaths {
    base_dir: PathBuf,
}

impl BookPaths {
    /// Resolve the base directory from the environment or platform defaults
    pub fn new() -> Result<Self, BookError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the book's JSON files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default target directory for report exports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    pub fn vouchers_file(&self) -> PathBuf {
        self.data_dir().join("vouchers.json")
    }

    /// Ensure the base, data and export directories exist
    pub fn ensure_directories(&self) -> Result<(), BookError> {
        for dir in [self.base_dir.clone(), self.data_dir(), self.export_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                BookError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
            })?;
        }

        Ok(())
    }

    /// Check if the book has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BookError> {
    ProjectDirs::from("", "", "ledgerbook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BookError::Config("Could not determine a home directory".into()))
}
