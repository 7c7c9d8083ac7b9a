//! Configuration module
//!
//! Configuration is read from environment variables (a `.env` file is loaded first when
//! present). Every value except `DATABASE_URL` has a default.

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_JPEG_QUALITY, DEFAULT_MAX_IMAGE_DIMENSION};

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_FILE_SIZE_MB: usize = 10;
const DEFAULT_MEDIA_ROOT: &str = "./media";
const DEFAULT_ALLOWED_EXTENSIONS: &str = "jpg,jpeg,png,gif,webp";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    /// Root directory under which uploads are stored
    pub media_root: PathBuf,
    /// Longest side of a normalized image, in pixels
    pub max_image_dimension: u32,
    pub jpeg_quality: u8,
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let config = Config {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            media_root: env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| DEFAULT_MEDIA_ROOT.to_string())
                .into(),
            max_image_dimension: env::var("MAX_IMAGE_DIMENSION")
                .unwrap_or_else(|_| DEFAULT_MAX_IMAGE_DIMENSION.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_IMAGE_DIMENSION must be a valid number"))?,
            jpeg_quality: env::var("JPEG_QUALITY")
                .unwrap_or_else(|_| DEFAULT_JPEG_QUALITY.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("JPEG_QUALITY must be a number between 1 and 100"))?,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_extensions: parse_extensions(
                &env::var("ALLOWED_EXTENSIONS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.to_string()),
            ),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database_url.trim().is_empty() {
            return Err(anyhow::anyhow!("DATABASE_URL cannot be empty"));
        }
        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be at least 1"));
        }
        if self.max_image_dimension == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGE_DIMENSION must be at least 1"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!(
                "JPEG_QUALITY must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be at least 1"));
        }
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS cannot be empty"));
        }
        Ok(())
    }
}

fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/photospective".to_string(),
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            media_root: PathBuf::from(DEFAULT_MEDIA_ROOT),
            max_image_dimension: DEFAULT_MAX_IMAGE_DIMENSION,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            allowed_extensions: parse_extensions(DEFAULT_ALLOWED_EXTENSIONS),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_quality() {
        let mut config = test_config();
        config.jpeg_quality = 0;
        assert!(config.validate().is_err());
        config.jpeg_quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        let mut config = test_config();
        config.max_image_dimension = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_extensions_normalizes() {
        assert_eq!(
            parse_extensions(" JPG, .png ,,webp"),
            vec!["jpg".to_string(), "png".to_string(), "webp".to_string()]
        );
    }
}
