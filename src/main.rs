//! # HEIC to PNG - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Creazione della configurazione e avvio del batch
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (root, dry-run, json, verbose)
//! 2. Configura il logging (INFO o DEBUG, `RUST_LOG` ha la precedenza)
//! 3. Crea un oggetto Config e avvia `BatchConverter`
//! 4. Esce con codice non zero solo se la root manca o non è valida
//!
//! ## Esempio di utilizzo:
//! ```bash
//! heic-to-png ./carpetas --verbose
//! HEIC2PNG_ROOT=./carpetas heic-to-png --json
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use heic_to_png::{run_batch, Config};

#[derive(Parser)]
#[command(name = "heic-to-png")]
#[command(about = "Convert HEIC photos to PNG, one png/ folder per source folder")]
struct Args {
    /// Directory whose subfolders contain HEIC files
    #[arg(env = "HEIC2PNG_ROOT", default_value = "carpetas")]
    root: PathBuf,

    /// Dry run - list what would be converted without writing files
    #[arg(long)]
    dry_run: bool,

    /// Emit JSON events on stdout instead of human-readable logs
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config {
        root_path: args.root,
        dry_run: args.dry_run,
        json_output: args.json,
    };

    run_batch(config).await?;

    Ok(())
}
