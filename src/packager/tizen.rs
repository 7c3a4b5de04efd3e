use super::Packager;
use crate::error::BuildError;
use crate::interrupt::Interrupt;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Packager backed by the Tizen SDK command line tool.
///
/// Runs `<tool> package -t wgt -s <profile> -- <staging>` and waits for it.
/// When an [`Interrupt`] is attached, raising it kills the child and fails
/// the build with [`BuildError::Interrupted`].
pub struct TizenCli {
    tool: PathBuf,
    verbose: bool,
    interrupt: Option<Interrupt>,
}

impl TizenCli {
    pub fn new(tool: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            tool: tool.into(),
            verbose,
            interrupt: None,
        }
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    /// Arguments passed to the tool, each as its own argv entry.
    pub fn args(profile: &str, staging: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["package", "-t", "wgt", "-s", profile, "--"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(staging.as_os_str().to_os_string());
        args
    }

    fn is_interrupted(&self) -> bool {
        self.interrupt.as_ref().is_some_and(Interrupt::is_triggered)
    }

    fn wait(&self, mut child: std::process::Child) -> Result<ExitStatus> {
        if self.interrupt.is_none() {
            return child.wait().context("Failed to wait for tizen cli");
        }

        loop {
            if let Some(status) = child.try_wait().context("Failed to poll tizen cli")? {
                return Ok(status);
            }
            if self.is_interrupted() {
                let _ = child.kill();
                let _ = child.wait();
                return Err(BuildError::Interrupted.into());
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Packager for TizenCli {
    fn package(&self, profile: &str, staging: &Path) -> Result<()> {
        if let Some(interrupt) = &self.interrupt {
            interrupt.check()?;
        }

        let mut cmd = Command::new(&self.tool);
        cmd.args(Self::args(profile, staging)).stdin(Stdio::null());
        if !self.verbose {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let child = cmd
            .spawn()
            .with_context(|| format!("Failed to execute tizen cli: {}", self.tool.display()))?;

        let status = self.wait(child)?;
        if !status.success() {
            return Err(BuildError::PackagerFailed(status).into());
        }

        Ok(())
    }
}
