use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Token in a profiles location that is replaced by the absolute workspace path.
pub const WORKSPACE_TOKEN: &str = "!WORKSPACE!";

/// profiles.xml location relative to a Tizen SDK workspace.
pub const DEFAULT_PROFILES_SUBPATH: &str = ".metadata/.plugins/org.tizen.common.sign/profiles.xml";

pub const DEFAULT_TIZEN_CLI: &str = "tizen";
pub const DEFAULT_PROFILE_NAME: &str = "default";
pub const DEFAULT_MINIFIER: &str = "yuicompressor";

/// What the user asked for. Read-only once resolved.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Project to package; required unless only displaying profiles
    pub project: Option<PathBuf>,
    pub workspace: PathBuf,
    pub output: PathBuf,
    /// Directory in which the temporary build folder is created
    pub staging_root: PathBuf,
    pub tizen_cli: PathBuf,
    /// Raw profiles.xml location, possibly containing [`WORKSPACE_TOKEN`]
    pub profiles: Option<String>,
    pub profile_name: String,
    pub display_profiles: bool,
    pub obfuscate: bool,
    pub minifier: PathBuf,
    pub verbose: bool,
}

impl Default for BuildRequest {
    fn default() -> Self {
        Self {
            project: None,
            workspace: PathBuf::from("."),
            output: PathBuf::from("."),
            staging_root: PathBuf::from("."),
            tizen_cli: PathBuf::from(DEFAULT_TIZEN_CLI),
            profiles: None,
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
            display_profiles: false,
            obfuscate: false,
            minifier: PathBuf::from(DEFAULT_MINIFIER),
            verbose: false,
        }
    }
}

impl BuildRequest {
    /// Effective profiles.xml location.
    ///
    /// An explicit location has `!WORKSPACE!` replaced literally by the
    /// absolute workspace path, which must then be an existing directory.
    /// Without one, the default location inside the workspace is used.
    pub fn profiles_location(&self) -> Result<PathBuf> {
        let Some(raw) = self.profiles.as_deref() else {
            return Ok(self.workspace.join(DEFAULT_PROFILES_SUBPATH));
        };

        if !raw.contains(WORKSPACE_TOKEN) {
            return Ok(PathBuf::from(raw));
        }

        let workspace = absolute(&self.workspace)?;
        if !workspace.is_dir() {
            return Err(BuildError::Validation(format!(
                "Workspace was given as a substitution in profiles, but the workspace option is not set correctly \"{}\" (-w).",
                workspace.display()
            ))
            .into());
        }

        Ok(PathBuf::from(
            raw.replace(WORKSPACE_TOKEN, &workspace.to_string_lossy()),
        ))
    }

    /// Check that an explicitly given profiles location names a file.
    ///
    /// The derived default is left to the tizen CLI to validate.
    pub fn validate_profiles(&self) -> Result<Option<PathBuf>> {
        if self.profiles.is_none() {
            return Ok(None);
        }
        let location = self.profiles_location()?;
        if !location.is_file() {
            return Err(BuildError::Validation(format!(
                "Profiles location is not valid \"{}\" (-p).",
                location.display()
            ))
            .into());
        }
        Ok(Some(location))
    }

    /// The project directory, which must exist and be a directory.
    pub fn project_dir(&self) -> Result<&Path> {
        match self.project.as_deref() {
            Some(p) if p.is_dir() => Ok(p),
            _ => Err(BuildError::Validation(
                "The argument -i <PATH> must be provided, it must be a directory, and it must be the path of your Samsung SDK Project.".to_string(),
            )
            .into()),
        }
    }
}

/// Absolute form of `path` without resolving symlinks.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve absolute path of {}", path.display()))
}
