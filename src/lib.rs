//! # HEIC to PNG Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom
//! - `file_manager`: Discovery cartelle e file HEIC, naming output
//! - `codec`: Decodifica HEIC (libheif) e codifica PNG (image)
//! - `converter`: Conversione per cartella e orchestrazione del run
//! - `progress`: Progress bar e statistiche
//! - `json_output`: Eventi JSON per uso programmatico
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use heic_to_png::{BatchConverter, Config};
//!
//! let config = Config { root_path: path, ..Default::default() };
//! let summary = BatchConverter::new(config).run().await?;
//! ```

pub mod codec;
pub mod config;
pub mod converter;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod progress;

pub use codec::{HeicDecoder, LibHeifDecoder, PixelMode, PngEncoder, RawImage};
pub use config::Config;
pub use converter::{run_batch, BatchConverter, FolderConverter, FolderStatus};
pub use error::ConvertError;
pub use progress::{FolderResult, RunSummary};
