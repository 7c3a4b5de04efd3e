use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::BuildError;

/// Shared "stop now" flag raised by the Ctrl+C handler.
///
/// Clones observe the same flag. Stages call [`Interrupt::check`] between
/// units of work; the packager polls it while waiting for its child.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Fail with [`BuildError::Interrupted`] once the flag is raised.
    pub fn check(&self) -> Result<()> {
        if self.is_triggered() {
            return Err(BuildError::Interrupted.into());
        }
        Ok(())
    }
}
