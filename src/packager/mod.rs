use anyhow::Result;
use std::path::Path;

pub mod tizen;

pub use tizen::TizenCli;

/// Widget packaging capability.
///
/// Implementations turn the prepared tree at `staging` into a `.wgt` archive
/// written inside `staging`, signed with the named profile.
pub trait Packager {
    fn package(&self, profile: &str, staging: &Path) -> Result<()>;
}

impl<F> Packager for F
where
    F: Fn(&str, &Path) -> Result<()>,
{
    fn package(&self, profile: &str, staging: &Path) -> Result<()> {
        self(profile, staging)
    }
}
