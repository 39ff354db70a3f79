//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri della conversione
//! - Fornisce validazione dei parametri di input prima di toccare il filesystem
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `root_path`: Directory che contiene le cartelle sorgente (default: `carpetas`)
//! - `dry_run`: Mostra cosa verrebbe convertito senza scrivere nulla (default: false)
//! - `json_output`: Eventi JSON su stdout invece di log testuali (default: false)
//!
//! ## Validazione:
//! - Controlla che `root_path` esista
//! - Controlla che `root_path` sia una directory
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config {
//!     root_path: PathBuf::from("/photos/carpetas"),
//!     dry_run: true,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the per-folder output directory, also used as the "already converted" marker
pub const OUTPUT_DIR_NAME: &str = "png";

/// Configuration for a batch conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory whose immediate subdirectories are scanned for HEIC files
    pub root_path: PathBuf,
    /// Dry run - report planned conversions without creating files
    pub dry_run: bool,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("carpetas"),
            dry_run: false,
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.root_path.as_os_str().is_empty() {
            return Err(ConvertError::Validation("Root path must not be empty".to_string()));
        }

        if !self.root_path.exists() {
            return Err(ConvertError::RootNotFound(self.root_path.clone()));
        }

        if !self.root_path.is_dir() {
            return Err(ConvertError::NotADirectory(self.root_path.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = Config {
            root_path: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.root_path = temp_dir.path().join("missing");
        assert!(matches!(config.validate(), Err(ConvertError::RootNotFound(_))));

        let file_path = temp_dir.path().join("not_a_dir.txt");
        std::fs::write(&file_path, b"x").unwrap();
        config.root_path = file_path;
        assert!(matches!(config.validate(), Err(ConvertError::NotADirectory(_))));

        config.root_path = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConvertError::Validation(_))));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.root_path, PathBuf::from("carpetas"));
        assert!(!config.dry_run);
        assert!(!config.json_output);
    }
}
