use anyhow::{Context, Result};

use crate::artifact::{self, PlacedArtifact};
use crate::error::BuildError;
use crate::interrupt::Interrupt;
use crate::minifier::{self, Minifier, MinifySummary};
use crate::packager::Packager;
use crate::reporter::Reporter;
use crate::request::{absolute, BuildRequest};
use crate::staging::{build_filter, StagingArea};

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub artifact: PlacedArtifact,
    /// Number of project files copied into the staging folder
    pub staged_files: usize,
    /// Present when JavaScript minification ran
    pub minify: Option<MinifySummary>,
}

/// Execute the packaging pipeline
///
/// Flow:
/// 1. Validate inputs
/// 2. Stage the project into a temporary folder (jar files and old top-level
///    widgets excluded)
/// 3. Optionally minify JavaScript in the staged copy
/// 4. Run the packager against the staged folder
/// 5. Copy the produced .wgt to the output and project folders
///
/// The temporary folder is removed on every return path. `interrupt` is
/// checked between stages and between minified files.
pub fn execute_build_pipeline(
    request: &BuildRequest,
    packager: &dyn Packager,
    minifier: &dyn Minifier,
    interrupt: &Interrupt,
    reporter: &Reporter,
) -> Result<BuildOutcome> {
    // --- 1. Validation ---
    request.validate_profiles()?;
    let project = request.project_dir()?;

    // --- 2. Staging ---
    let staging = StagingArea::create(&request.staging_root, *reporter)?;
    reporter.info(format!("Project folder: {}", absolute(project)?.display()));
    reporter.info(format!("Temporary folder: {}", staging.path().display()));

    reporter.info("Copying project folder to temporary directory.");
    let staged_files = staging.populate(project, &build_filter(project))?;
    interrupt.check()?;

    // --- 3. Minification ---
    let minify = if request.obfuscate {
        reporter.info("Obfuscation option set. Traversing temporary folder.");
        let summary = minifier::minify_tree(staging.path(), minifier, interrupt, reporter)?;
        reporter.info(format!(
            "Minified {} file(s), {} failed",
            summary.minified.len(),
            summary.failed.len()
        ));
        Some(summary)
    } else {
        None
    };

    // --- 4. Packaging ---
    interrupt.check()?;
    reporter.info(format!(
        "Building package with profile '{}'.",
        request.profile_name
    ));
    packager
        .package(&request.profile_name, staging.path())
        .context("Could not build package!")?;

    // --- 5. Placement ---
    let widget = artifact::find_widget(staging.path())?.ok_or(BuildError::PackageNotCreated)?;
    let placed = artifact::place(&widget, &request.output, project)?;
    reporter.info(format!("App Package created at: {}", placed.output.display()));
    reporter.info(format!("Copied to: {}", placed.project.display()));

    Ok(BuildOutcome {
        artifact: placed,
        staged_files,
        minify,
    })
}
