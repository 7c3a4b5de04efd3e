use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::interrupt::Interrupt;
use crate::reporter::Reporter;

pub mod external;

pub use external::ExternalMinifier;

/// JavaScript minification capability.
///
/// Implementations read `input` and write the minified result to `output`.
pub trait Minifier {
    fn minify(&self, input: &Path, output: &Path) -> Result<()>;
}

impl<F> Minifier for F
where
    F: Fn(&Path, &Path) -> Result<()>,
{
    fn minify(&self, input: &Path, output: &Path) -> Result<()> {
        self(input, output)
    }
}

/// Path fragment of the Caph library, which is never minified.
const CAPH_SEGMENT: [&str; 2] = ["lib", "caph"];

/// Result of a minification pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MinifySummary {
    /// Files replaced by their minified form
    pub minified: Vec<PathBuf>,
    /// Files left as they were (or half-replaced) because a step failed
    pub failed: Vec<PathBuf>,
}

/// Whether a file should be routed through the minifier.
///
/// Eligible files end in `.js`, do not already contain `.min` in their name
/// and do not live under `lib/caph`.
pub fn is_eligible(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    if !name.ends_with(".js") || name.contains(".min") {
        return false;
    }

    let caph = CAPH_SEGMENT.join(std::path::MAIN_SEPARATOR_STR);
    !path.to_string_lossy().contains(&caph)
}

/// Minify every eligible `.js` file under `root` in place.
///
/// The tree is walked depth first and eligible files are collected before any
/// is rewritten. Per-file failures are reported as warnings and the pass
/// carries on with the next file.
///
/// Raising `interrupt` stops the pass before the next file.
pub fn minify_tree(
    root: &Path,
    minifier: &dyn Minifier,
    interrupt: &Interrupt,
    reporter: &Reporter,
) -> Result<MinifySummary> {
    let mut eligible = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if entry.file_type().is_file() && is_eligible(entry.path()) {
            eligible.push(entry.into_path());
        }
    }

    let mut summary = MinifySummary::default();
    for file in eligible {
        interrupt.check()?;
        reporter.info(format!("Obfuscate: {}", file.display()));
        match minify_in_place(&file, minifier) {
            Ok(()) => summary.minified.push(file),
            Err(e) => {
                reporter.warn(format!(
                    "Could not overwrite javascript file with generated obfuscated file: {e:#}"
                ));
                summary.failed.push(file);
            }
        }
    }

    Ok(summary)
}

/// Minify one file and move the result over the original.
///
/// The minifier writes into a fresh uniquely named file next to the input, so
/// existing siblings such as `app.js.min.js` are never touched. If the
/// minifier fails the original is left as it was.
fn minify_in_place(file: &Path, minifier: &dyn Minifier) -> Result<()> {
    let parent = file
        .parent()
        .with_context(|| format!("No parent directory for {}", file.display()))?;
    let name = file.file_name().unwrap_or_default().to_string_lossy();

    let generated = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".min.js")
        .tempfile_in(parent)
        .with_context(|| format!("Failed to create minifier output in {}", parent.display()))?
        .into_temp_path();

    minifier
        .minify(file, &generated)
        .with_context(|| format!("Minifier failed on {}", file.display()))?;

    let produced = fs::metadata(&generated)
        .with_context(|| format!("Minifier output vanished for {}", file.display()))?
        .len();
    let original = fs::metadata(file)
        .with_context(|| format!("Failed to stat {}", file.display()))?
        .len();
    if produced == 0 && original > 0 {
        anyhow::bail!("Minifier produced no output for {}", file.display());
    }

    // rename within the same directory replaces the original in one step
    generated
        .persist(file)
        .with_context(|| format!("Failed to overwrite {}", file.display()))?;
    Ok(())
}
