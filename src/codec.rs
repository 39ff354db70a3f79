//! # Codec Module
//!
//! Questo modulo incapsula il collaboratore esterno di decodifica/codifica.
//!
//! ## Responsabilità:
//! - `HeicDecoder`: trait per decodificare un file HEIC in un buffer raw
//! - `LibHeifDecoder`: implementazione reale basata su `libheif-rs`
//! - `PngEncoder`: scrive un `RawImage` come PNG tramite il crate `image`
//! - `RawImage`: buffer interleaved + modalità pixel + dimensioni
//!
//! ## Contratto:
//! Il resto dell'applicazione dipende solo dalla coppia
//! `decode(path) -> RawImage` / `encode(RawImage, path)`. Qualsiasi errore
//! interno del codec è opaco e viene contato come errore del singolo file.
//!
//! ## Esempio:
//! ```rust,ignore
//! let raw = LibHeifDecoder::new().decode(Path::new("IMG_0001.heic"))?;
//! PngEncoder::new().encode(&raw, Path::new("png/IMG_0001.png"))?;
//! ```

use crate::error::ConvertError;
use image::{ColorType, ImageFormat};
use libheif_rs::{ColorSpace, HeifContext, Image, LibHeif, RgbChroma};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Pixel layout of a decoded buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    Rgb8,
    Rgba8,
}

impl PixelMode {
    /// Bytes per pixel
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rgb8 => "RGB",
            Self::Rgba8 => "RGBA",
        }
    }

    fn color_type(&self) -> ColorType {
        match self {
            Self::Rgb8 => ColorType::Rgb8,
            Self::Rgba8 => ColorType::Rgba8,
        }
    }
}

impl fmt::Display for PixelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded image held in memory: tightly packed, interleaved, 8 bits per sample
#[derive(Debug, Clone)]
pub struct RawImage {
    pub mode: PixelMode,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RawImage {
    /// Build an image from a tightly packed buffer, checking its length
    pub fn new(
        mode: PixelMode,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Result<Self, ConvertError> {
        let image = Self {
            mode,
            width,
            height,
            data,
        };
        image.check_len()?;
        Ok(image)
    }

    /// Build an image from rows separated by `stride` bytes, dropping row padding
    pub fn from_strided(
        mode: PixelMode,
        width: u32,
        height: u32,
        data: &[u8],
        stride: usize,
    ) -> Result<Self, ConvertError> {
        let row_len = width as usize * mode.channels();
        if stride < row_len {
            return Err(ConvertError::UnsupportedMode(format!(
                "{} row stride {} is shorter than row length {}",
                mode, stride, row_len
            )));
        }

        let rows = height as usize;
        let needed = if rows == 0 { 0 } else { stride * (rows - 1) + row_len };
        if data.len() < needed {
            return Err(ConvertError::BufferSize {
                expected: needed,
                actual: data.len(),
            });
        }

        let mut packed = Vec::with_capacity(row_len * rows);
        for row in 0..rows {
            let start = row * stride;
            packed.extend_from_slice(&data[start..start + row_len]);
        }

        Self::new(mode, width, height, packed)
    }

    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.mode.channels()
    }

    fn check_len(&self) -> Result<(), ConvertError> {
        let expected = self.expected_len();
        if self.data.len() != expected {
            return Err(ConvertError::BufferSize {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Decodes a HEIC file into a raw pixel buffer.
///
/// Implementations run on tokio's blocking pool, hence `Send + Sync`.
pub trait HeicDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<RawImage, ConvertError>;
}

/// HEIC decoder backed by the system libheif
#[derive(Debug, Default, Clone, Copy)]
pub struct LibHeifDecoder;

impl LibHeifDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl HeicDecoder for LibHeifDecoder {
    fn decode(&self, path: &Path) -> Result<RawImage, ConvertError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| ConvertError::Decode(format!("Non UTF-8 path: {}", path.display())))?;

        let lib_heif = LibHeif::new();
        let ctx = HeifContext::read_from_file(path_str)
            .map_err(|e| ConvertError::Decode(format!("Failed to read HEIC: {}", e)))?;

        let handle = ctx
            .primary_image_handle()
            .map_err(|e| ConvertError::Decode(format!("Failed to get primary image: {}", e)))?;

        let (mode, chroma) = if handle.has_alpha_channel() {
            (PixelMode::Rgba8, RgbChroma::Rgba)
        } else {
            (PixelMode::Rgb8, RgbChroma::Rgb)
        };

        let decoded = lib_heif
            .decode(&handle, ColorSpace::Rgb(chroma), None)
            .map_err(|e| ConvertError::Decode(format!("Failed to decode HEIC: {}", e)))?;

        let raw = raw_from_image(&decoded, mode)?;
        debug!("Decoded {}: {}x{} {}", path.display(), raw.width, raw.height, raw.mode);
        Ok(raw)
    }
}

/// Pack the interleaved plane of a decoded libheif image into a `RawImage`
fn raw_from_image(image: &Image, mode: PixelMode) -> Result<RawImage, ConvertError> {
    let planes = image.planes();
    let plane = planes.interleaved.ok_or_else(|| {
        ConvertError::UnsupportedMode(format!("No interleaved {} plane found", mode))
    })?;

    RawImage::from_strided(mode, plane.width, plane.height, plane.data, plane.stride)
}

/// Writes raw pixel buffers as PNG files
#[derive(Debug, Default, Clone, Copy)]
pub struct PngEncoder;

impl PngEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode `image` to `output_path`, overwriting any existing file
    pub fn encode(&self, image: &RawImage, output_path: &Path) -> Result<(), ConvertError> {
        image.check_len()?;

        image::save_buffer_with_format(
            output_path,
            &image.data,
            image.width,
            image.height,
            image.mode.color_type(),
            ImageFormat::Png,
        )?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Decoder for tests: files whose contents start with `corrupt` fail,
    /// everything else decodes to a 2x2 RGB image.
    pub struct FakeDecoder;

    impl HeicDecoder for FakeDecoder {
        fn decode(&self, path: &Path) -> Result<RawImage, ConvertError> {
            let bytes = std::fs::read(path)?;
            if bytes.starts_with(b"corrupt") {
                return Err(ConvertError::Decode("Invalid input: no ftyp box".to_string()));
            }
            RawImage::new(PixelMode::Rgb8, 2, 2, vec![200; 12])
        }
    }
}
