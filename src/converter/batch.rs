//! # Batch Converter Module
//!
//! Orchestratore principale del run.
//!
//! ## Flusso di esecuzione:
//! 1. **Validazione**: La root deve esistere ed essere una directory (unico errore fatale)
//! 2. **Discovery**: Elenca le sottocartelle immediate in ordine lessicografico
//! 3. **Skip policy**: Salta le cartelle con `png` già presente, senza scansione
//! 4. **Conversione**: Delega a `FolderConverter` le cartelle con file HEIC
//! 5. **Reporting**: Riepilogo finale (cartelle processate, convertiti, errori)
//!
//! Le cartelle vengono elaborate una alla volta, i file uno alla volta.

use crate::{
    codec::{HeicDecoder, LibHeifDecoder},
    config::Config,
    converter::folder::FolderConverter,
    file_manager::FileManager,
    json_output::{JsonMessage, SkipReason},
    progress::{FolderResult, RunSummary},
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// What happened to one source folder during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderStatus {
    /// `png` output directory already present
    AlreadyConverted,
    /// No HEIC files in the folder
    NoHeicFiles,
    /// Dry run: files that would be converted
    Planned { files: usize },
    Converted(FolderResult),
    /// The folder could not be listed
    ScanFailed(String),
}

/// Orchestratore principale
pub struct BatchConverter {
    config: Config,
    folder_converter: FolderConverter,
}

impl BatchConverter {
    /// Batch converter decoding through the system libheif
    pub fn new(config: Config) -> Self {
        Self::with_decoder(config, Arc::new(LibHeifDecoder::new()))
    }

    pub fn with_decoder(config: Config, decoder: Arc<dyn HeicDecoder>) -> Self {
        let folder_converter = FolderConverter::new(decoder, config.json_output);
        Self {
            config,
            folder_converter,
        }
    }

    /// Esegue il run completo sulla root configurata
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let root = self.config.root_path.clone();

        // text mode leaves reporting to the caller, main prints the returned error
        if let Err(e) = self.config.validate() {
            if self.config.json_output {
                JsonMessage::error(e.to_string(), None).emit();
            }
            return Err(e.into());
        }

        let folders = FileManager::list_source_folders(&root)?;
        let mut summary = RunSummary::new();
        summary.folders_found = folders.len();

        if folders.is_empty() {
            self.handle_empty_root(&root, &summary, start_time);
            return Ok(summary);
        }

        self.emit_start_message(&root, folders.len());

        for folder in &folders {
            match self.process_folder(folder).await {
                FolderStatus::AlreadyConverted => summary.add_skipped(),
                FolderStatus::NoHeicFiles => summary.add_empty(),
                FolderStatus::Planned { files } => summary.add_planned(files),
                FolderStatus::Converted(result) => summary.add_processed(result),
                FolderStatus::ScanFailed(_) => {}
            }
        }

        self.print_final_stats(&summary, start_time.elapsed().as_secs_f64());
        Ok(summary)
    }

    /// Applica la skip policy a una cartella e, se serve, la converte
    pub async fn process_folder(&self, folder: &Path) -> FolderStatus {
        let name = FileManager::display_name(folder);

        if FileManager::is_already_converted(folder) {
            if self.config.json_output {
                JsonMessage::folder_skipped(folder.to_path_buf(), SkipReason::AlreadyConverted)
                    .emit();
            } else {
                info!("[DIR] {} [ALREADY CONVERTED]", name);
            }
            return FolderStatus::AlreadyConverted;
        }

        let files = match FileManager::find_heic_files(folder) {
            Ok(files) => files,
            Err(e) => {
                if self.config.json_output {
                    JsonMessage::error(
                        format!("Failed to scan {}", folder.display()),
                        Some(e.to_string()),
                    )
                    .emit();
                } else {
                    error!("[DIR] {}: failed to scan folder: {}", name, e);
                }
                return FolderStatus::ScanFailed(e.to_string());
            }
        };

        if files.is_empty() {
            if self.config.json_output {
                JsonMessage::folder_skipped(folder.to_path_buf(), SkipReason::NoHeicFiles).emit();
            } else {
                info!("[DIR] {}", name);
                warn!("  No HEIC files found");
            }
            return FolderStatus::NoHeicFiles;
        }

        if self.config.json_output {
            JsonMessage::folder_start(folder.to_path_buf(), files.len(), self.config.dry_run)
                .emit();
        } else {
            info!("[DIR] {}", name);
            info!("  Found {} HEIC files", files.len());
        }

        if self.config.dry_run {
            self.log_planned(folder, &files);
            return FolderStatus::Planned { files: files.len() };
        }

        let result = self.folder_converter.convert_folder(folder).await;

        if self.config.json_output {
            JsonMessage::folder_complete(folder.to_path_buf(), result).emit();
        } else {
            info!("  Result: {} converted, {} errors", result.converted, result.errors);
        }

        FolderStatus::Converted(result)
    }

    fn log_planned(&self, folder: &Path, files: &[PathBuf]) {
        let output_dir = FileManager::output_dir(folder);
        for file in files {
            match FileManager::png_output_path(file, &output_dir) {
                Ok(target) => {
                    debug!("  Dry run: would convert {} -> {}", file.display(), target.display())
                }
                Err(e) => debug!("  Dry run: {}", e),
            }
        }
        if !self.config.json_output {
            info!("  Dry run: {} files would be converted", files.len());
        }
    }

    fn emit_start_message(&self, root: &Path, total_folders: usize) {
        if self.config.json_output {
            JsonMessage::start(root.to_path_buf(), total_folders, &self.config).emit();
        } else {
            info!("{}", "=".repeat(60));
            info!("Processing {} folder(s) in {}", total_folders, root.display());
            if self.config.dry_run {
                info!("Dry run mode: No files will be written");
            }
            info!("{}", "=".repeat(60));
        }
    }

    fn handle_empty_root(&self, root: &Path, summary: &RunSummary, start_time: Instant) {
        if self.config.json_output {
            JsonMessage::complete(summary.clone(), start_time.elapsed().as_secs_f64()).emit();
        } else {
            info!("No folders found inside {}", root.display());
        }
    }

    fn print_final_stats(&self, summary: &RunSummary, duration: f64) {
        if self.config.json_output {
            JsonMessage::complete(summary.clone(), duration).emit();
            return;
        }

        info!("{}", "=".repeat(60));
        info!("FINAL SUMMARY:");
        info!("  Folders processed: {}", summary.folders_processed);
        info!("  Total converted: {}", summary.files_converted);
        info!("  Total errors: {}", summary.files_errored);
        debug!("{}", summary.format_summary());
        if self.config.dry_run {
            info!("  Files that would be converted: {}", summary.files_planned);
        }
        info!("  Duration: {:.2}s", duration);
        info!("{}", "=".repeat(60));
    }
}
