//! Usage-example manifest loading.
//!
//! A project declares its example invocations in a TOML manifest that lives
//! next to the entry-point script: `scripts/make_emperor.py` is described by
//! `scripts/make_emperor.examples.toml`. The builder reads this file instead
//! of importing the project's own code.
//!
//! ```text
//! [[example]]
//! description = "Basic PCoA plot"
//! expected = "an interactive ordination of the test data"
//! command = "%prog -i unweighted_unifrac_pc.txt -m mapping.txt -o out1"
//! output-dir = "out1"
//! ```

mod error;
mod example;

pub use error::ManifestError;
pub use example::{UsageExample, PROG_PLACEHOLDER};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The declared list of usage examples for one entry-point script.
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleManifest {
    /// Examples in declaration order; the gallery preserves this order.
    #[serde(rename = "example", default)]
    pub examples: Vec<UsageExample>,
}

/// Derives the manifest path for an entry-point script.
///
/// `scripts/make_emperor.py` -> `scripts/make_emperor.examples.toml`.
#[must_use]
pub fn manifest_path_for(script_path: &Path) -> PathBuf {
    script_path.with_extension("examples.toml")
}

/// Loads and validates a usage-example manifest.
///
/// # Errors
///
/// Returns [`ManifestError`] if the file is missing or unreadable, is not
/// valid TOML, or contains an invalid example entry.
pub fn load_manifest(path: &Path) -> Result<ExampleManifest, ManifestError> {
    debug!(path = %path.display(), "Loading usage-example manifest");

    let contents = std::fs::read_to_string(path).map_err(|e| ManifestError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let manifest: ExampleManifest =
        toml::from_str(&contents).map_err(|e| ManifestError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

    for example in &manifest.examples {
        example
            .validate()
            .map_err(|message| ManifestError::ValidationError {
                path: path.display().to_string(),
                message,
            })?;
    }

    info!(count = manifest.examples.len(), "Loaded usage examples");
    Ok(manifest)
}
