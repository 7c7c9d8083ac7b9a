use photospective_core::AppError;

/// Errors raised while normalizing or reading an image file
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode or encode image: {0}")]
    Image(#[from] ::image::ImageError),

    #[error("Failed to rewrite image container: {0}")]
    Container(String),
}

impl From<img_parts::Error> for ProcessingError {
    fn from(err: img_parts::Error) -> Self {
        ProcessingError::Container(err.to_string())
    }
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Io(e) => AppError::Storage(format!("Image file is not accessible: {}", e)),
            ProcessingError::Image(e) => AppError::ImageProcessing(format!("Invalid image file: {}", e)),
            ProcessingError::Container(msg) => AppError::ImageProcessing(msg),
        }
    }
}
