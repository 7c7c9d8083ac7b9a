use ::image::ImageFormat;
use photospective_core::{AppError, Config};
use std::path::Path;

/// Reasons an upload is refused before it reaches storage
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("File content is not a supported image")]
    UnrecognizedContent,

    #[error("File content is {detected} but the extension is .{extension}")]
    ContentMismatch { extension: String, detected: String },

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            other => AppError::InvalidInput(other.to_string()),
        }
    }
}

/// Upload validator
///
/// Checks the name and the leading bytes of an upload. Full decoding happens later,
/// during normalization.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_file_size_bytes,
            config.allowed_extensions.clone(),
        )
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Reject names that are empty, hidden, or carry directory components.
    pub fn validate_filename(&self, filename: &str) -> Result<(), ValidationError> {
        let invalid = filename.trim().is_empty()
            || filename.starts_with('.')
            || filename.contains(['/', '\\', '\0']);
        if invalid {
            return Err(ValidationError::InvalidFilename(filename.to_string()));
        }
        Ok(())
    }

    /// Lowercased extension of `filename` if it is allowed.
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }

    /// Sniff the image format from the content and check it agrees with the extension.
    pub fn validate_content(&self, extension: &str, data: &[u8]) -> Result<(), ValidationError> {
        let detected =
            ::image::guess_format(data).map_err(|_| ValidationError::UnrecognizedContent)?;

        let expected = ImageFormat::from_extension(extension)
            .ok_or_else(|| ValidationError::UnrecognizedContent)?;

        if detected != expected {
            return Err(ValidationError::ContentMismatch {
                extension: extension.to_string(),
                detected: format!("{:?}", detected).to_lowercase(),
            });
        }

        Ok(())
    }

    pub fn validate_all(&self, filename: &str, data: &[u8]) -> Result<(), ValidationError> {
        self.validate_file_size(data.len())?;
        self.validate_filename(filename)?;
        let extension = self.validate_extension(filename)?;
        self.validate_content(&extension, data)?;
        Ok(())
    }
}
