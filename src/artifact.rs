use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BuildError;

pub const WIDGET_EXTENSION: &str = ".wgt";

/// Where a produced widget ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedArtifact {
    pub name: String,
    pub output: PathBuf,
    pub project: PathBuf,
}

/// Whether `path` names a widget archive.
pub fn is_widget(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().ends_with(WIDGET_EXTENSION))
}

/// The `.wgt` file the packager wrote directly inside `dir`.
///
/// Staging never receives top-level widgets from the project, so every
/// candidate here was produced by the packager. If it wrote more than one,
/// the most recently modified wins; equal timestamps fall back to name order.
pub fn find_widget(dir: &Path) -> Result<Option<PathBuf>> {
    let rd = fs::read_dir(dir).with_context(|| format!("Failed to read dir: {}", dir.display()))?;

    let mut widgets = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("Failed to read dir: {}", dir.display()))?;
        let path = entry.path();
        if !is_widget(&path) || !path.is_file() {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        widgets.push((modified, path));
    }

    let newest = widgets
        .into_iter()
        .max_by(|(ta, pa), (tb, pb)| ta.cmp(tb).then_with(|| pb.cmp(pa)));
    Ok(newest.map(|(_, path)| path))
}

/// Copy `widget` into the output folder and into the project folder.
///
/// The output folder is created if missing; existing files are overwritten.
pub fn place(widget: &Path, output_dir: &Path, project_dir: &Path) -> Result<PlacedArtifact> {
    let name = widget
        .file_name()
        .with_context(|| format!("Invalid package path: {}", widget.display()))?
        .to_string_lossy()
        .into_owned();

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output folder {}", output_dir.display()))
        .context(BuildError::Placement(output_dir.to_path_buf()))?;

    let output = output_dir.join(&name);
    copy_artifact(widget, &output)?;

    let project = project_dir.join(&name);
    copy_artifact(widget, &project)?;

    Ok(PlacedArtifact {
        name,
        output,
        project,
    })
}

fn copy_artifact(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))
        .context(BuildError::Placement(to.to_path_buf()))?;
    Ok(())
}
