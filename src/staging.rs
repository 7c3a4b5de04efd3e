use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::artifact::is_widget;
use crate::error::BuildError;
use crate::reporter::Reporter;
use crate::request::absolute;

/// Name prefix of every temporary build folder.
pub const STAGING_PREFIX: &str = "temp-builder-folder-";

/// Ids are drawn from `0..STAGING_ID_BOUND` (eight decimal digits).
const STAGING_ID_BOUND: u32 = 100_000_000;
const MAX_CREATE_ATTEMPTS: usize = 16;

/// Temporary build folder owned by a single invocation.
///
/// The folder and everything in it is removed when the value is dropped, so
/// every exit path of the build releases it. Removal failures are reported
/// and otherwise ignored.
#[derive(Debug)]
pub struct StagingArea {
    path: PathBuf,
    reporter: Reporter,
}

impl StagingArea {
    /// Create a uniquely named folder `temp-builder-folder-<id>` under `root`.
    ///
    /// `root` is created if missing. A name collision retries with a new id.
    pub fn create(root: &Path, reporter: Reporter) -> Result<Self> {
        let root = absolute(root)?;
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create staging root {}", root.display()))
            .context(BuildError::Staging(root.clone()))?;

        let mut rng = rand::thread_rng();
        for _ in 0..MAX_CREATE_ATTEMPTS {
            let id = rng.gen_range(0..STAGING_ID_BOUND);
            let path = root.join(format!("{STAGING_PREFIX}{id}"));

            match fs::create_dir(&path) {
                Ok(()) => return Ok(Self { path, reporter }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context("Failed to create a temporary directory for storing build files")
                        .context(BuildError::Staging(path)));
                }
            }
        }

        Err(anyhow::anyhow!(
            "No free temporary directory name after {MAX_CREATE_ATTEMPTS} attempts"
        )
        .context(BuildError::Staging(root)))
    }

    /// Absolute path of the staging folder.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy `project` into the staging folder, keeping files for which
    /// `include` returns true.
    pub fn populate(&self, project: &Path, include: &dyn Fn(&Path) -> bool) -> Result<usize> {
        copy_filtered(project, &self.path, include)
            .context(BuildError::Staging(self.path.clone()))
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        self.reporter.info("Deleting temporary directory.");
        match fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => self.reporter.warn(format!(
                "Failed to delete temporary directory {}: {e}",
                self.path.display()
            )),
        }
    }
}

/// Default copy filter: everything except `.jar` files.
pub fn exclude_jars(path: &Path) -> bool {
    !path
        .file_name()
        .map(|name| name.to_string_lossy().ends_with(".jar"))
        .unwrap_or(false)
}

/// Copy filter for builds.
///
/// Drops `.jar` files anywhere and `.wgt` files directly inside `project`,
/// where earlier builds leave their package.
pub fn build_filter(project: &Path) -> impl Fn(&Path) -> bool + '_ {
    move |path: &Path| exclude_jars(path) && !(path.parent() == Some(project) && is_widget(path))
}

/// Recursively copy `src` into `dst`, preserving relative structure.
///
/// `include` is consulted for regular files only; directories are always
/// created and traversed. If `dst` lives inside `src` it is not descended
/// into. Returns the number of files copied.
pub fn copy_filtered(src: &Path, dst: &Path, include: &dyn Fn(&Path) -> bool) -> Result<usize> {
    let dst_canonical = fs::canonicalize(dst).ok();
    let mut copied = 0;

    let walker = WalkDir::new(src)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && dst_canonical.is_some()
                && fs::canonicalize(entry.path()).ok() == dst_canonical)
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Unexpected path outside source: {}", entry.path().display()))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory {}", target.display()))?;
        } else if include(entry.path()) {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}
