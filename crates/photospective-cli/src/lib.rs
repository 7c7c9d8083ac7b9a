use anyhow::Context;
use photospective_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;
use std::path::Path;

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays valid JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("photospective=info")),
        )
        .init();
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Name under which a local file is uploaded
pub fn upload_filename(path: &Path) -> Result<String, AppError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::InvalidInput(format!("Not a file name: {}", path.display()))
        })
}

/// Log `err` at its level, print the client message and return the exit code.
pub fn report_error(err: &AppError) -> u8 {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(code = err.error_code(), error = %err, "Command failed"),
        LogLevel::Warn => tracing::warn!(code = err.error_code(), error = %err, "Command failed"),
        LogLevel::Error => tracing::error!(
            code = err.error_code(),
            error = %err.detailed_message(),
            "Command failed"
        ),
    }
    eprintln!("error: {}", err.client_message());
    u8::try_from(err.exit_code()).unwrap_or(1)
}
