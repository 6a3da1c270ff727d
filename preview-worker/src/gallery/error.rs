//! Gallery build error types.

use crate::exec::ExecError;
use crate::manifest::ManifestError;
use thiserror::Error;

/// Errors that can occur while building an example gallery.
///
/// Individual example commands failing is not an error; those are recorded
/// in the build report.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The entry-point script does not exist.
    #[error("The script path does not exist: {path}")]
    MissingScript { path: String },

    /// The output directory does not exist.
    #[error("The output directory has to exist: {path}")]
    MissingOutputDir { path: String },

    /// The usage-example manifest could not be loaded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Filesystem failure while preparing or publishing the gallery.
    #[error("Gallery I/O failure at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The shell could not be spawned at all.
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// Index page rendering failed.
    #[error(transparent)]
    Render(#[from] handlebars::RenderError),
}
