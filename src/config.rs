use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::request::BuildRequest;

/// Default name of the optional defaults file, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "tizen-builder.toml";

/// Defaults file structure (`tizen-builder.toml`).
///
/// Every key is optional; command line flags take precedence.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub tizen: TizenConfig,
    #[serde(default)]
    pub minify: MinifyConfig,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub workspace: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub staging_root: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TizenConfig {
    /// Path to the tizen CLI
    pub cli: Option<PathBuf>,

    /// Signing profile name
    pub profile: Option<String>,

    /// profiles.xml location, may contain `!WORKSPACE!`
    pub profiles: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct MinifyConfig {
    pub enabled: Option<bool>,
    pub command: Option<PathBuf>,
}

/// Load the defaults file.
///
/// An explicit path must exist. When no path is given the default file is
/// read if present and otherwise ignored.
pub fn load(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    let path = match explicit {
        Some(p) => {
            if !p.is_file() {
                anyhow::bail!("Configuration file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.is_file() {
                return Ok(None);
            }
            p
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(Some(config))
}

pub fn parse(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}

/// Merge command line flags over file defaults over built-in defaults.
pub fn resolve(cli: Cli, file: Option<FileConfig>) -> BuildRequest {
    let file = file.unwrap_or_default();
    let defaults = BuildRequest::default();

    BuildRequest {
        project: cli.project,
        workspace: cli
            .workspace
            .or(file.paths.workspace)
            .unwrap_or(defaults.workspace),
        output: cli.output.or(file.paths.output).unwrap_or(defaults.output),
        staging_root: cli
            .staging_root
            .or(file.paths.staging_root)
            .unwrap_or(defaults.staging_root),
        tizen_cli: cli.tizen_cli.or(file.tizen.cli).unwrap_or(defaults.tizen_cli),
        profiles: cli.profiles.or(file.tizen.profiles),
        profile_name: cli
            .profile_name
            .or(file.tizen.profile)
            .unwrap_or(defaults.profile_name),
        display_profiles: cli.display_profiles,
        obfuscate: cli.obfuscate || file.minify.enabled.unwrap_or(false),
        minifier: cli
            .minifier
            .or(file.minify.command)
            .unwrap_or(defaults.minifier),
        verbose: cli.verbose,
    }
}
