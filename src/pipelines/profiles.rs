use anyhow::{Context, Result};
use std::io::Write;

use crate::error::BuildError;
use crate::request::BuildRequest;

/// Print the signing profiles file to `out`. No build takes place.
pub fn execute_profiles_pipeline(request: &BuildRequest, out: &mut dyn Write) -> Result<()> {
    let location = request.profiles_location()?;
    if !location.is_file() {
        return Err(BuildError::Validation(format!(
            "Profiles file not found \"{}\" (-p, -w).",
            location.display()
        ))
        .into());
    }

    // echoed byte for byte; the file may declare a non-UTF-8 encoding
    let data = std::fs::read(&location)
        .with_context(|| format!("Failed to read {}", location.display()))?;

    writeln!(out, "Your profiles.xml file:")?;
    out.write_all(&data)?;
    writeln!(out)?;

    Ok(())
}
