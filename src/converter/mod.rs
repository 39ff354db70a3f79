//! # Converter Module
//!
//! Separa le responsabilità in sottomoduli:
//! - `batch`: Orchestratore del run sulla root
//! - `folder`: Worker per la singola cartella sorgente

pub mod batch;
pub mod folder;

pub use batch::{BatchConverter, FolderStatus};
pub use folder::FolderConverter;

use crate::{config::Config, progress::RunSummary};
use anyhow::Result;

/// Run a full batch with the system libheif decoder
pub async fn run_batch(config: Config) -> Result<RunSummary> {
    BatchConverter::new(config).run().await
}
