//! In-place image normalizer

use crate::error::ProcessingError;
use ::image::codecs::jpeg::JpegEncoder;
use ::image::imageops::FilterType;
use ::image::{DynamicImage, GenericImageView, ImageReader};
use bytes::Bytes;
use img_parts::jpeg::Jpeg;
use img_parts::{DynImage, ImageEXIF};
use photospective_core::constants::DEFAULT_JPEG_QUALITY;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

/// Rewrites stored images as bounded-size JPEGs, keeping their EXIF block.
#[derive(Debug, Clone, Copy)]
pub struct ImageNormalizer {
    jpeg_quality: u8,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl ImageNormalizer {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    /// Normalize the image at `path` in place.
    ///
    /// The longest side ends up at most `max_dimension` pixels (never upscaled, aspect
    /// ratio preserved). A source without EXIF is written without one.
    pub fn normalize(&self, path: &Path, max_dimension: u32) -> Result<(), ProcessingError> {
        let data = fs::read(path)?;
        let exif = Self::read_exif_block(&data);

        let img = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()?
            .decode()?;
        let (source_width, source_height) = img.dimensions();

        let img = Self::fit_within(img, max_dimension);
        let (width, height) = img.dimensions();

        let encoded = Self::encode_jpeg(&img, self.jpeg_quality)?;
        let has_exif = exif.is_some();
        let output = match exif {
            Some(block) => Self::attach_exif(encoded, block)?,
            None => encoded,
        };

        Self::replace_file(path, &output)?;

        tracing::debug!(
            path = %path.display(),
            source_width,
            source_height,
            width,
            height,
            has_exif,
            size_bytes = output.len(),
            "Normalized image"
        );

        Ok(())
    }

    /// Raw EXIF block (TIFF structure, without the `Exif\0\0` marker) of a JPEG, PNG or
    /// WebP file. Other formats and files without a block yield `None`.
    pub fn read_exif_block(data: &[u8]) -> Option<Bytes> {
        match DynImage::from_bytes(Bytes::copy_from_slice(data)) {
            Ok(Some(image)) => image.exif(),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Could not parse image container, EXIF not carried over");
                None
            }
        }
    }

    fn fit_within(img: DynamicImage, max_dimension: u32) -> DynamicImage {
        let (width, height) = img.dimensions();
        if width <= max_dimension && height <= max_dimension {
            return img;
        }
        img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
    }

    fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ProcessingError> {
        let rgb = img.to_rgb8();
        let mut buffer = Vec::with_capacity((rgb.width() * rgb.height()) as usize / 4);
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            encoder.encode_image(&rgb)?;
        }
        Ok(buffer)
    }

    fn attach_exif(encoded: Vec<u8>, exif: Bytes) -> Result<Vec<u8>, ProcessingError> {
        let mut jpeg = Jpeg::from_bytes(Bytes::from(encoded))?;
        jpeg.set_exif(Some(exif));
        Ok(jpeg.encoder().bytes().to_vec())
    }

    /// Write through a temporary file in the same directory so readers never see a
    /// half-written image.
    fn replace_file(path: &Path, data: &[u8]) -> Result<(), ProcessingError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
