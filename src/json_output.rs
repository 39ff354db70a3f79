//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per chi lancia il
//! converter da un altro processo (script, GUI).
//!
//! ## Responsabilità:
//! - Emette un oggetto JSON per riga su stdout per ogni evento del run
//! - Riutilizza `FolderResult` e `RunSummary` per i conteggi
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del run (root, numero di cartelle, config)
//! - `folder_skipped`: Cartella saltata (già convertita o senza HEIC)
//! - `folder_start`: Inizio conversione di una cartella
//! - `file_complete`: Fine conversione di un file (output o errore)
//! - `folder_complete`: Conteggi finali di una cartella
//! - `complete`: Riepilogo finale del run
//! - `error`: Errore fatale

use crate::config::Config;
use crate::progress::{FolderResult, RunSummary};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Why a folder was not converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyConverted,
    NoHeicFiles,
}

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    Start {
        root: PathBuf,
        total_folders: usize,
        config: Config,
    },

    FolderSkipped {
        folder: PathBuf,
        reason: SkipReason,
    },

    FolderStart {
        folder: PathBuf,
        files: usize,
        dry_run: bool,
    },

    FileComplete {
        input: PathBuf,
        output: Option<PathBuf>,
        error: Option<String>,
    },

    FolderComplete {
        folder: PathBuf,
        result: FolderResult,
    },

    Complete {
        summary: RunSummary,
        duration_seconds: f64,
    },

    Error {
        message: String,
        details: Option<String>,
    },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(root: PathBuf, total_folders: usize, config: &Config) -> Self {
        Self::Start {
            root,
            total_folders,
            config: config.clone(),
        }
    }

    pub fn folder_skipped(folder: PathBuf, reason: SkipReason) -> Self {
        Self::FolderSkipped { folder, reason }
    }

    pub fn folder_start(folder: PathBuf, files: usize, dry_run: bool) -> Self {
        Self::FolderStart {
            folder,
            files,
            dry_run,
        }
    }

    pub fn file_converted(input: PathBuf, output: PathBuf) -> Self {
        Self::FileComplete {
            input,
            output: Some(output),
            error: None,
        }
    }

    pub fn file_failed(input: PathBuf, error: String) -> Self {
        Self::FileComplete {
            input,
            output: None,
            error: Some(error),
        }
    }

    pub fn folder_complete(folder: PathBuf, result: FolderResult) -> Self {
        Self::FolderComplete { folder, result }
    }

    pub fn complete(summary: RunSummary, duration_seconds: f64) -> Self {
        Self::Complete {
            summary,
            duration_seconds,
        }
    }

    pub fn error(message: String, details: Option<String>) -> Self {
        Self::Error { message, details }
    }
}
