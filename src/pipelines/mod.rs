mod build;
mod profiles;

pub use build::{execute_build_pipeline, BuildOutcome};
pub use profiles::execute_profiles_pipeline;
