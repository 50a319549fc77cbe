//! Flat file writers
//!
//! Snapshots are written as pretty-printed JSON, the report as HTML.
//! Every write replaces the previous file.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Configuration for the JSON writer
#[derive(Debug, Clone)]
pub struct JsonWriterConfig {
    indent: usize,
    create_dirs: bool,
}

impl JsonWriterConfig {
    /// Number of spaces per indentation level
    #[must_use]
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Whether missing parent directories are created
    #[must_use]
    pub fn creates_dirs(&self) -> bool {
        self.create_dirs
    }
}

impl Default for JsonWriterConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            create_dirs: true,
        }
    }
}

impl JsonWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable parent directory creation
    #[must_use]
    pub fn with_create_dirs(mut self, enabled: bool) -> Self {
        self.create_dirs = enabled;
        self
    }
}

/// Serialize a value to JSON bytes with the configured indentation
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T, config: &JsonWriterConfig) -> Result<Vec<u8>> {
    let indent = vec![b' '; config.indent];
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write a value as JSON, replacing the file
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<usize> {
    write_json_with_config(path, value, &JsonWriterConfig::default())
}

/// Write a value as JSON with an explicit config
pub fn write_json_with_config<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
    config: &JsonWriterConfig,
) -> Result<usize> {
    let bytes = to_json_bytes(value, config)?;
    write_bytes(path.as_ref(), &bytes, config.create_dirs)
}

/// Read a JSON file back into a value
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write an HTML document, replacing the file
pub fn write_html(path: impl AsRef<Path>, html: &str) -> Result<usize> {
    write_bytes(path.as_ref(), html.as_bytes(), true)
}

fn write_bytes(path: &Path, bytes: &[u8], create_dirs: bool) -> Result<usize> {
    if create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::Output {
                message: format!("Failed to create directory {}: {e}", parent.display()),
            })?;
        }
    }

    fs::write(path, bytes).map_err(|e| Error::Output {
        message: format!("Failed to write {}: {e}", path.display()),
    })?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}
