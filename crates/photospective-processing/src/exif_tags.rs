//! EXIF tag extraction
//!
//! Turns the EXIF block of a stored upload into `attribute name -> value` pairs that
//! the tag recorder files under categories. Only the primary image IFD is read; the
//! thumbnail IFD repeats most camera fields and is ignored.

use crate::error::ProcessingError;
use crate::image::ImageNormalizer;
use exif::{Field, In, Reader, Tag, Value};
use photospective_core::constants::{DEFAULT_MAX_IMAGE_DIMENSION, UNKNOWN_TAG_NAME};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Attribute name (`Make`, `FocalLength`, ...) to human-readable value.
pub type ExifTags = HashMap<String, String>;

/// Normalizes an uploaded image and reads its EXIF attributes.
#[derive(Debug, Clone, Copy)]
pub struct TagExtractor {
    normalizer: ImageNormalizer,
    max_dimension: u32,
}

impl Default for TagExtractor {
    fn default() -> Self {
        Self::new(ImageNormalizer::default(), DEFAULT_MAX_IMAGE_DIMENSION)
    }
}

impl TagExtractor {
    pub fn new(normalizer: ImageNormalizer, max_dimension: u32) -> Self {
        Self {
            normalizer,
            max_dimension,
        }
    }

    /// Normalize the file at `path` in place, then read its tags.
    ///
    /// Normalization errors are returned as-is. A file without EXIF yields an empty map.
    pub fn extract(&self, path: &Path) -> Result<ExifTags, ProcessingError> {
        self.normalizer.normalize(path, self.max_dimension)?;
        let tags = Self::read_tags(path)?;

        tracing::debug!(
            path = %path.display(),
            tag_count = tags.len(),
            "Extracted EXIF tags"
        );

        Ok(tags)
    }

    /// Read the tags of a file without touching it.
    pub fn read_tags(path: &Path) -> Result<ExifTags, ProcessingError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => Ok(Self::translate_fields(exif.fields())),
            Err(exif::Error::NotFound(_)) => Ok(ExifTags::new()),
            Err(exif::Error::Io(e)) => Err(ProcessingError::Io(e)),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Unreadable EXIF block, treating image as untagged"
                );
                Ok(ExifTags::new())
            }
        }
    }

    /// Map primary-image fields to name/value pairs. Binary and valueless fields are
    /// dropped; unknown tags collapse onto a single placeholder name.
    pub fn translate_fields<'a>(fields: impl Iterator<Item = &'a Field>) -> ExifTags {
        let mut tags = ExifTags::new();
        for field in fields.filter(|f| f.ifd_num == In::PRIMARY && !is_ifd_pointer(f.tag)) {
            if let Some(value) = Self::field_value(field) {
                tags.insert(Self::tag_name(field), value);
            }
        }
        tags
    }

    fn tag_name(field: &Field) -> String {
        if field.tag.description().is_some() {
            field.tag.to_string()
        } else {
            UNKNOWN_TAG_NAME.to_string()
        }
    }

    fn field_value(field: &Field) -> Option<String> {
        let rendered = match &field.value {
            Value::Byte(..) | Value::SByte(..) | Value::Undefined(..) | Value::Unknown(..) => {
                return None
            }
            Value::Ascii(parts) => parts
                .iter()
                .map(|part| String::from_utf8_lossy(part).replace('\0', ""))
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            _ => field.display_value().to_string(),
        };

        let rendered = rendered.trim();
        if rendered.is_empty() {
            None
        } else {
            Some(rendered.to_string())
        }
    }
}

/// Offsets linking the IFDs together; structural, not attributes of the photo
fn is_ifd_pointer(tag: Tag) -> bool {
    tag == Tag::ExifIFDPointer || tag == Tag::GPSInfoIFDPointer || tag == Tag::InteropIFDPointer
}
