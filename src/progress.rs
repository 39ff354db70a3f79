//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche di conversione.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per i file di una cartella
//! - `FolderResult`: conteggi (convertiti, errori) di una singola cartella
//! - `RunSummary`: statistiche aggregate dell'intero run
//!
//! ## Statistiche tracciate:
//! - **folders_found**: Sottocartelle trovate nella root
//! - **folders_processed**: Cartelle effettivamente convertite
//! - **folders_skipped**: Cartelle saltate perché già convertite (`png` presente)
//! - **folders_empty**: Cartelle senza file HEIC
//! - **files_converted** / **files_errored**: Totali sui file
//! - **files_planned**: File che verrebbero convertiti (solo dry run)
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:12] [========================================] 4/4 (100%) [OK] IMG_0004.heic
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Manages progress reporting for the files of one folder
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        let template = concat!(
            "{spinner:.green} [{elapsed_precise}] ",
            "[{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        );
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars("=>-"));
        }

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Progress manager that draws nothing (JSON mode)
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish and clear the bar, leaving log lines intact
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Conversion counts for a single source folder
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderResult {
    pub converted: usize,
    pub errors: usize,
}

impl FolderResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_converted(&mut self) {
        self.converted += 1;
    }

    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Files attempted in this folder
    pub fn total(&self) -> usize {
        self.converted + self.errors
    }
}

/// Aggregate statistics for a whole run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub folders_found: usize,
    pub folders_processed: usize,
    pub folders_skipped: usize,
    pub folders_empty: usize,
    pub files_converted: usize,
    pub files_errored: usize,
    pub files_planned: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_processed(&mut self, result: FolderResult) {
        self.folders_processed += 1;
        self.files_converted += result.converted;
        self.files_errored += result.errors;
    }

    pub fn add_skipped(&mut self) {
        self.folders_skipped += 1;
    }

    pub fn add_empty(&mut self) {
        self.folders_empty += 1;
    }

    pub fn add_planned(&mut self, files: usize) {
        self.files_planned += files;
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Folders processed: {} | Converted: {} | Errors: {} | \
             Already converted: {} | Without HEIC: {}",
            self.folders_processed,
            self.files_converted,
            self.files_errored,
            self.folders_skipped,
            self.folders_empty,
        )
    }
}
