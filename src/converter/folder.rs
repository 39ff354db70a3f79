//! # Folder Converter Module
//!
//! Worker per la conversione di una singola cartella sorgente.
//! Ogni errore di un file resta confinato al file: viene contato e loggato,
//! poi si passa al file successivo.

use crate::{
    codec::{HeicDecoder, PngEncoder},
    error::ConvertError,
    file_manager::FileManager,
    json_output::JsonMessage,
    progress::{FolderResult, ProgressManager},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Converts every HEIC file of a folder into `<folder>/png/<stem>.png`
pub struct FolderConverter {
    decoder: Arc<dyn HeicDecoder>,
    encoder: PngEncoder,
    json_output: bool,
}

impl FolderConverter {
    pub fn new(decoder: Arc<dyn HeicDecoder>, json_output: bool) -> Self {
        Self {
            decoder,
            encoder: PngEncoder::new(),
            json_output,
        }
    }

    /// Convert all HEIC files in `folder`. Never fails: per-file errors end up
    /// in the returned counts.
    pub async fn convert_folder(&self, folder: &Path) -> FolderResult {
        let mut result = FolderResult::new();
        let output_dir = FileManager::output_dir(folder);

        // scan first: a folder that cannot be listed must not get the png/ marker
        let files = match FileManager::find_heic_files(folder) {
            Ok(files) => files,
            Err(e) => {
                error!("Failed to list HEIC files in {}: {}", folder.display(), e);
                return result;
            }
        };

        let dir_error = tokio::fs::create_dir_all(&output_dir)
            .await
            .err()
            .map(|e| format!("Failed to create {}: {}", output_dir.display(), e));

        if files.is_empty() {
            return result;
        }

        let file_count = files.len();

        let progress = if self.json_output {
            ProgressManager::hidden()
        } else {
            ProgressManager::new(file_count as u64)
        };

        for file_path in files {
            let outcome = match &dir_error {
                Some(message) => Err(ConvertError::Validation(message.clone())),
                None => self.convert_file(&file_path, &output_dir).await,
            };
            let name = FileManager::display_name(&file_path);

            match outcome {
                Ok(output_path) => {
                    result.add_converted();
                    if self.json_output {
                        JsonMessage::file_converted(file_path.clone(), output_path).emit();
                    } else {
                        let output_name = FileManager::display_name(&output_path);
                        info!("  [OK] {} -> {}", name, output_name);
                    }
                    progress.update(&format!("[OK] {}", name));
                }
                Err(e) => {
                    result.add_error();
                    if self.json_output {
                        JsonMessage::file_failed(file_path.clone(), e.to_string()).emit();
                    } else {
                        error!("  [ERROR] Error converting {}: {}", name, e);
                    }
                    progress.update(&format!("[ERROR] {}", name));
                }
            }
        }

        progress.finish();
        debug_assert_eq!(result.total(), file_count);
        result
    }

    /// Decode one HEIC file and write it as PNG into `output_dir`
    pub async fn convert_file(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, ConvertError> {
        let output_path = FileManager::png_output_path(input, output_dir)
            .map_err(|e| ConvertError::Validation(e.to_string()))?;

        debug!("Converting {} -> {}", input.display(), output_path.display());

        // libheif and the PNG encoder block, keep them off the runtime threads
        let decoder = Arc::clone(&self.decoder);
        let encoder = self.encoder;
        let input = input.to_path_buf();
        let target = output_path.clone();
        tokio::task::spawn_blocking(move || {
            let raw = decoder.decode(&input)?;
            let encoded = encoder.encode(&raw, &target);
            if encoded.is_err() {
                // a failed file must not leave a truncated PNG behind
                let _ = std::fs::remove_file(&target);
            }
            encoded
        })
        .await??;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::test_support::FakeDecoder;
    use std::fs;
    use tempfile::TempDir;

    fn converter() -> FolderConverter {
        FolderConverter::new(Arc::new(FakeDecoder), true)
    }

    fn png_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_valid_and_corrupt_files_are_counted() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path();
        fs::write(folder.join("a.heic"), b"heic").unwrap();
        fs::write(folder.join("b.HEIC"), b"heic").unwrap();
        fs::write(folder.join("c.heic"), b"heic").unwrap();
        fs::write(folder.join("broken.heic"), b"corrupt data").unwrap();
        fs::write(folder.join("readme.txt"), b"not an image").unwrap();

        let result = converter().convert_folder(folder).await;

        assert_eq!(result, FolderResult { converted: 3, errors: 1 });
        assert_eq!(png_files(&folder.join("png")), vec!["a.png", "b.png", "c.png"]);
    }

    #[tokio::test]
    async fn test_folder_without_heic_creates_empty_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path();
        fs::write(folder.join("photo.jpg"), b"jpeg").unwrap();

        let result = converter().convert_folder(folder).await;

        assert_eq!(result, FolderResult { converted: 0, errors: 0 });
        assert!(folder.join("png").is_dir());
        assert!(png_files(&folder.join("png")).is_empty());
    }

    #[tokio::test]
    async fn test_output_name_drops_extension_casing() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path();
        fs::write(folder.join("IMG_0001.HEIC"), b"heic").unwrap();

        let result = converter().convert_folder(folder).await;

        assert_eq!(result.converted, 1);
        assert!(folder.join("png").join("IMG_0001.png").is_file());
    }

    #[tokio::test]
    async fn test_existing_output_is_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path();
        fs::write(folder.join("IMG_0002.heic"), b"heic").unwrap();
        fs::create_dir(folder.join("png")).unwrap();
        fs::write(folder.join("png").join("IMG_0002.png"), b"old").unwrap();

        let result = converter().convert_folder(folder).await;

        assert_eq!(result.converted, 1);
        let bytes = fs::read(folder.join("png").join("IMG_0002.png")).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_heic_symlink_counts_as_error() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path();
        std::os::unix::fs::symlink(folder.join("gone.heic"), folder.join("x.heic")).unwrap();

        let result = converter().convert_folder(folder).await;

        assert_eq!(result, FolderResult { converted: 0, errors: 1 });
        assert!(png_files(&folder.join("png")).is_empty());
    }

    #[tokio::test]
    async fn test_unlistable_folder_gets_no_marker() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("vanished");

        let result = converter().convert_folder(&folder).await;

        assert_eq!(result, FolderResult::new());
        assert!(!folder.exists());
    }

    #[tokio::test]
    async fn test_convert_file_reports_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("bad.heic");
        fs::write(&input, b"corrupt").unwrap();
        let output_dir = temp_dir.path().join("png");
        fs::create_dir(&output_dir).unwrap();

        let result = converter().convert_file(&input, &output_dir).await;

        assert!(matches!(result, Err(ConvertError::Decode(_))));
        assert!(!output_dir.join("bad.png").exists());
    }
}
