use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failure kinds of a build.
///
/// Carried inside `anyhow::Error`; callers can find them with
/// [`BuildError::find`] to decide how to report or which exit code to use.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to stage project into {}", .0.display())]
    Staging(PathBuf),

    #[error(
        "The App Package was not created - unknown reason - check that your tizen cli file is correctly set (-t)!"
    )]
    PackageNotCreated,

    #[error("Tizen packager exited with {0}")]
    PackagerFailed(ExitStatus),

    #[error("Build interrupted")]
    Interrupted,

    #[error("Failed to copy package to {}", .0.display())]
    Placement(PathBuf),
}

impl BuildError {
    /// Locate the first `BuildError` anywhere in an error chain.
    pub fn find(err: &anyhow::Error) -> Option<&BuildError> {
        // downcast_ref also sees through nested `.context(BuildError::..)` layers
        err.downcast_ref::<BuildError>()
            .or_else(|| err.chain().find_map(|cause| cause.downcast_ref::<BuildError>()))
    }

    /// Process exit code associated with this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Interrupted => 130,
            _ => 1,
        }
    }
}

/// Exit code for an arbitrary pipeline error.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    BuildError::find(err).map(BuildError::exit_code).unwrap_or(1)
}
