use super::Minifier;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Minifier backed by an external compressor executable.
///
/// Invoked as `<command> <input> -o <output>`, the YUI Compressor calling
/// convention.
pub struct ExternalMinifier {
    command: PathBuf,
    verbose: bool,
}

impl ExternalMinifier {
    pub fn new(command: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            command: command.into(),
            verbose,
        }
    }
}

impl Minifier for ExternalMinifier {
    fn minify(&self, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.command);
        cmd.arg(input).arg("-o").arg(output);
        if !self.verbose {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to execute minifier: {}", self.command.display()))?;

        if !status.success() {
            anyhow::bail!("Minifier exited with {status}");
        }

        Ok(())
    }
}
