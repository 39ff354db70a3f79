//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery delle cartelle.
//!
//! ## Responsabilità:
//! - Elenco delle sottocartelle immediate della root, in ordine lessicografico
//! - Ricerca dei file HEIC in una cartella sorgente (non ricorsiva)
//! - Riconoscimento estensione `.heic` case-insensitive
//! - Calcolo della cartella `png` e del nome del file di output
//!
//! ## Marker di conversione:
//! Una cartella sorgente è considerata già convertita se contiene una
//! sottocartella chiamata esattamente `png`. Nessun altro stato viene salvato.
//!
//! ## Esempio:
//! ```rust,ignore
//! for folder in FileManager::list_source_folders(root)? {
//!     if FileManager::is_already_converted(&folder) {
//!         continue;
//!     }
//!     let files = FileManager::find_heic_files(&folder)?;
//! }
//! ```

use crate::config::OUTPUT_DIR_NAME;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// List immediate subdirectories of `root`, sorted by name
    pub fn list_source_folders(root: &Path) -> Result<Vec<PathBuf>> {
        let mut folders = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let Some(entry) = Self::readable_entry(entry)? else {
                continue;
            };
            if entry.file_type().is_dir() {
                folders.push(entry.into_path());
            }
        }

        Ok(folders)
    }

    /// Find HEIC files directly inside `folder`, sorted by name
    pub fn find_heic_files(folder: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && Self::is_heic(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) if e.depth() == 0 => return Err(e.into()),
                // keep unreadable HEIC entries so the conversion counts them as errors
                Err(e) => match e.path() {
                    Some(path) if Self::is_heic(path) => {
                        warn!("Unreadable HEIC entry: {}", e);
                        files.push(path.to_path_buf());
                    }
                    _ => warn!("Skipping unreadable entry: {}", e),
                },
            }
        }

        Ok(files)
    }

    /// Errors on the scanned directory itself propagate; unreadable children
    /// (broken symlinks, permission denied) are skipped with a warning.
    /// Only used for folder discovery, HEIC scanning keeps unreadable files.
    fn readable_entry(
        entry: walkdir::Result<walkdir::DirEntry>,
    ) -> Result<Option<walkdir::DirEntry>> {
        match entry {
            Ok(entry) => Ok(Some(entry)),
            Err(e) if e.depth() == 0 => Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                Ok(None)
            }
        }
    }

    /// Check if a file has a `.heic` extension, in any casing
    pub fn is_heic(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("heic"))
            .unwrap_or(false)
    }

    /// Output directory for a source folder
    pub fn output_dir(folder: &Path) -> PathBuf {
        folder.join(OUTPUT_DIR_NAME)
    }

    /// A folder counts as converted as soon as its output directory exists
    pub fn is_already_converted(folder: &Path) -> bool {
        Self::output_dir(folder).exists()
    }

    /// PNG path for a HEIC file: same stem, `.png` extension, inside `output_dir`
    pub fn png_output_path(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
        let file_stem = input_path
            .file_stem()
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", input_path.display()))?;

        let mut file_name = file_stem.to_os_string();
        file_name.push(".png");
        Ok(output_dir.join(file_name))
    }

    /// Display name of a path's final component
    pub fn display_name(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_heic_case_insensitive() {
        assert!(FileManager::is_heic(Path::new("photo.heic")));
        assert!(FileManager::is_heic(Path::new("photo.HEIC")));
        assert!(FileManager::is_heic(Path::new("photo.Heic")));
        assert!(!FileManager::is_heic(Path::new("photo.heif")));
        assert!(!FileManager::is_heic(Path::new("photo.jpg")));
        assert!(!FileManager::is_heic(Path::new("heic")));
    }

    #[test]
    fn test_png_output_path() {
        let out = Path::new("/photos/A/png");

        let cases = [
            ("/photos/A/IMG_0001.heic", "/photos/A/png/IMG_0001.png"),
            ("/photos/A/IMG_0001.HEIC", "/photos/A/png/IMG_0001.png"),
            ("/photos/A/trip.day1.heic", "/photos/A/png/trip.day1.png"),
        ];
        for (input, expected) in cases {
            let path = FileManager::png_output_path(Path::new(input), out).unwrap();
            assert_eq!(path, PathBuf::from(expected));
        }
    }

    #[test]
    fn test_list_source_folders_sorted_dirs_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("b")).unwrap();
        fs::create_dir(root.join("a")).unwrap();
        fs::create_dir_all(root.join("c").join("nested")).unwrap();
        fs::write(root.join("loose.heic"), b"data").unwrap();

        let folders = FileManager::list_source_folders(root).unwrap();
        let names: Vec<String> = folders.iter().map(|f| FileManager::display_name(f)).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_find_heic_files_matches_both_casings() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path();
        fs::write(folder.join("photo.HEIC"), b"data").unwrap();
        fs::write(folder.join("photo2.heic"), b"data").unwrap();
        fs::write(folder.join("notes.txt"), b"data").unwrap();
        fs::create_dir(folder.join("dir.heic")).unwrap();
        fs::create_dir(folder.join("sub")).unwrap();
        fs::write(folder.join("sub").join("deep.heic"), b"data").unwrap();

        let files = FileManager::find_heic_files(folder).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| FileManager::is_heic(f)));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_heic_files_keeps_dangling_heic_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path();
        fs::write(folder.join("good.heic"), b"data").unwrap();
        std::os::unix::fs::symlink(folder.join("gone.heic"), folder.join("dangling.heic")).unwrap();
        std::os::unix::fs::symlink(folder.join("gone.txt"), folder.join("dangling.txt")).unwrap();

        let files = FileManager::find_heic_files(folder).unwrap();
        let names: Vec<String> = files.iter().map(|f| FileManager::display_name(f)).collect();
        assert_eq!(names, vec!["dangling.heic", "good.heic"]);
    }

    #[test]
    fn test_find_heic_files_missing_folder_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(FileManager::find_heic_files(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_already_converted_marker() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path();
        assert!(!FileManager::is_already_converted(folder));

        fs::create_dir(FileManager::output_dir(folder)).unwrap();
        assert!(FileManager::is_already_converted(folder));
    }
}
