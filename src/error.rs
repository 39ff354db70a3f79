//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare tutti gli errori possibili
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `RootNotFound` / `NotADirectory`: Errori fatali, interrompono il run
//! - `Io`: Errori di I/O (permessi, disco pieno, etc.)
//! - `Decode`: File HEIC corrotto o non leggibile da libheif
//! - `UnsupportedMode` / `BufferSize`: Buffer decodificato non codificabile
//! - `Image`: Errori di scrittura PNG
//! - `Task`: Il worker bloccante del codec è andato in panic
//! - `Validation`: Errori di validazione input
//!
//! ## Esempio:
//! ```rust,ignore
//! if !root.exists() {
//!     return Err(ConvertError::RootNotFound(root.to_path_buf()));
//! }
//! ```

use std::path::PathBuf;

/// Custom error types for HEIC conversion
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("HEIC decode error: {0}")]
    Decode(String),

    #[error("Unsupported pixel mode: {0}")]
    UnsupportedMode(String),

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Root path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Codec task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConvertError::RootNotFound(PathBuf::from("carpetas"));
        assert_eq!(err.to_string(), "Root directory not found: carpetas");

        let err = ConvertError::BufferSize { expected: 12, actual: 3 };
        assert_eq!(err.to_string(), "Pixel buffer has 3 bytes, expected 12");
    }
}
