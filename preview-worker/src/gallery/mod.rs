//! Usage-example gallery builder.
//!
//! Builds a project's example gallery into a deployment directory: copies the
//! module's test data, runs every declared example command, and writes an
//! `index.html` linking each example's output. Example commands are allowed
//! to fail; the link is emitted either way and the failure is only logged and
//! counted.

mod error;
mod page;
mod target;

pub use error::GalleryError;
pub use page::{ExampleLink, PageRenderer};
pub use target::DeployTarget;

use crate::exec::{run_command, CommandSpec};
use crate::manifest::{load_manifest, manifest_path_for};
use std::path::Path;
use tracing::{error, info, warn};

/// Outcome of one gallery build.
#[derive(Debug, Clone, Copy, Default)]
pub struct GalleryReport {
    /// Examples whose commands were executed (and linked).
    pub examples_attempted: usize,
    /// Of those, how many exited non-zero or failed to launch.
    pub command_failures: usize,
}

/// Builds the example gallery for one deployment target.
///
/// `script_path` is the project's entry-point script; its usage examples are
/// declared in the manifest next to it (see [`manifest_path_for`]). The
/// gallery is written to `<output_dir>/<module>/`, where `module` is the
/// script's file stem; `output_dir` must already exist.
///
/// # Errors
///
/// Returns [`GalleryError`] if the script or output directory is missing,
/// the manifest cannot be loaded, or the index page cannot be written.
/// Per-example command failures are reported, not returned.
pub async fn build_gallery(
    script_path: &Path,
    output_dir: &Path,
    target: DeployTarget,
    source_tree_url: &str,
) -> Result<GalleryReport, GalleryError> {
    if !script_path.exists() {
        return Err(GalleryError::MissingScript {
            path: script_path.display().to_string(),
        });
    }
    if !output_dir.exists() {
        return Err(GalleryError::MissingOutputDir {
            path: output_dir.display().to_string(),
        });
    }

    let (module, program) = script_names(script_path)?;
    info!(module, target = %target.dir_name(), "Building example gallery");

    // The examples run inside <output_dir>/<module>, next to the test data
    // they consume.
    let workdir = output_dir.join(&module);
    std::fs::create_dir_all(&workdir).map_err(|e| GalleryError::Io {
        path: workdir.display().to_string(),
        source: e,
    })?;

    copy_test_data(script_path, &module, &workdir)?;

    let manifest = load_manifest(&manifest_path_for(script_path))?;

    let mut links = Vec::with_capacity(manifest.examples.len());
    let mut failures = 0usize;

    for example in &manifest.examples {
        let command = example.resolved_command(&program);

        // Fresh-build invariant: the example's previous output must be gone
        // before the command runs.
        let stale = workdir.join(&example.output_dir);
        info!(path = %stale.display(), "Deleting stale example output");
        match std::fs::remove_dir_all(&stale) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %stale.display(), error = %e, "Could not delete stale output"),
        }

        info!(command = %command, "Executing usage example");
        match run_command(&CommandSpec::Shell(command.clone()), &workdir).await {
            Ok(output) if output.success() => {}
            Ok(output) => {
                failures += 1;
                error!(command = %command, output = %output.combined(), "Usage example failed");
            }
            Err(e) => {
                failures += 1;
                error!(command = %command, error = %e, "Usage example could not be launched");
            }
        }

        links.push(ExampleLink::for_output_dir(&example.output_dir));
    }

    let renderer = PageRenderer::new();
    let html = renderer.render_index(
        &target.source_url(source_tree_url),
        &target.label(),
        &links,
    )?;

    let index_path = workdir.join("index.html");
    std::fs::write(&index_path, html).map_err(|e| GalleryError::Io {
        path: index_path.display().to_string(),
        source: e,
    })?;

    info!(
        examples = links.len(),
        failures, "Example gallery build finished"
    );
    Ok(GalleryReport {
        examples_attempted: links.len(),
        command_failures: failures,
    })
}

/// Derives the module name (file stem) and program name (file name) from the
/// entry-point script path.
fn script_names(script_path: &Path) -> Result<(String, String), GalleryError> {
    let missing = || GalleryError::MissingScript {
        path: script_path.display().to_string(),
    };
    let module = script_path
        .file_stem()
        .ok_or_else(missing)?
        .to_string_lossy()
        .into_owned();
    let program = script_path
        .file_name()
        .ok_or_else(missing)?
        .to_string_lossy()
        .into_owned();
    Ok((module, program))
}

/// Copies the module's test-data tree into the build directory, overwriting
/// existing files. The tree lives at
/// `<project>/tests/scripts_test_data/<module>/`.
fn copy_test_data(script_path: &Path, module: &str, workdir: &Path) -> Result<(), GalleryError> {
    let test_data = script_path
        .parent()
        .and_then(Path::parent)
        .map(|root| root.join("tests").join("scripts_test_data").join(module));

    match test_data {
        Some(src) if src.is_dir() => copy_tree(&src, workdir),
        Some(src) => {
            warn!(path = %src.display(), "No test data for module, examples run without inputs");
            Ok(())
        }
        None => {
            warn!(script = %script_path.display(), "Script has no project root, skipping test data");
            Ok(())
        }
    }
}

/// Recursively copies `src` into `dst`, overwriting files that exist.
fn copy_tree(src: &Path, dst: &Path) -> Result<(), GalleryError> {
    let io_err = |path: &Path, e: std::io::Error| GalleryError::Io {
        path: path.display().to_string(),
        source: e,
    };

    std::fs::create_dir_all(dst).map_err(|e| io_err(dst, e))?;
    let entries = std::fs::read_dir(src).map_err(|e| io_err(src, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| io_err(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if from.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            std::fs::copy(&from, &to).map_err(|e| io_err(&from, e))?;
        }
    }

    Ok(())
}
