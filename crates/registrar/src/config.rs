//! Registrar configuration.
//!
//! Configuration is read from TOML. Every field is optional and defaults to
//! the behavior an inspector front-end expects:
//!
//! ```toml
//! editable-documents = false
//! filter-embedder-content-scripts = true
//! repopulate-on-reset = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or an unknown key.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tunables for [`crate::ArtifactRegistrar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RegistrarConfig {
	/// Register documents as editable units.
	pub editable_documents: bool,
	/// Drop content scripts whose URL has no host and no `sourceURL` annotation.
	pub filter_embedder_content_scripts: bool,
	/// Walk the frame tree after a project reset.
	pub repopulate_on_reset: bool,
}

impl Default for RegistrarConfig {
	fn default() -> Self {
		Self {
			editable_documents: false,
			filter_embedder_content_scripts: true,
			repopulate_on_reset: true,
		}
	}
}

impl RegistrarConfig {
	/// Parses configuration from a TOML string.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Loads configuration from a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn empty_input_yields_defaults() {
		assert_eq!(RegistrarConfig::from_toml_str("").unwrap(), RegistrarConfig::default());
	}

	#[test]
	fn fields_override_defaults() {
		let config = RegistrarConfig::from_toml_str(
			"editable-documents = true\nfilter-embedder-content-scripts = false\n",
		)
		.unwrap();

		assert!(config.editable_documents);
		assert!(!config.filter_embedder_content_scripts);
		assert!(config.repopulate_on_reset);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = RegistrarConfig::from_toml_str("editable-stylesheets = false").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}

	#[test]
	fn load_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "repopulate-on-reset = false").unwrap();

		let config = RegistrarConfig::load(file.path()).unwrap();
		assert!(!config.repopulate_on_reset);
	}

	#[test]
	fn load_reports_missing_path() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("absent.toml");

		let err = RegistrarConfig::load(&missing).unwrap_err();
		match err {
			ConfigError::Io { path, .. } => assert_eq!(path, missing),
			other => panic!("unexpected error: {other}"),
		}
	}
}
