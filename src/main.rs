use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;

use tizen_builder::cli::Cli;
use tizen_builder::minifier::ExternalMinifier;
use tizen_builder::packager::TizenCli;
use tizen_builder::pipelines::{execute_build_pipeline, execute_profiles_pipeline};
use tizen_builder::{config, error, Interrupt, Reporter};

/// CLI entry point
///
/// Parses arguments, runs the selected pipeline and turns failures into a
/// formatted message plus a non-zero exit code.
fn main() {
    let cli = Cli::parse();
    let reporter = Reporter::new(cli.verbose);

    let code = match run(cli, &reporter) {
        Ok(()) => 0,
        Err(e) => {
            reporter.error(&e);
            error::exit_code(&e)
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli, reporter: &Reporter) -> Result<()> {
    let file_config = config::load(cli.config.as_deref())?;
    let request = config::resolve(cli, file_config);

    if request.display_profiles {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        return execute_profiles_pipeline(&request, &mut out);
    }

    let start_time = Instant::now();

    // Ctrl+C stops the build and kills the packager child instead of being swallowed
    let interrupt = Interrupt::new();
    let handler = interrupt.clone();
    ctrlc::set_handler(move || handler.trigger()).context("Failed to install Ctrl+C handler")?;

    let packager =
        TizenCli::new(&request.tizen_cli, request.verbose).with_interrupt(interrupt.clone());
    let minifier = ExternalMinifier::new(&request.minifier, request.verbose);

    let outcome = execute_build_pipeline(&request, &packager, &minifier, &interrupt, reporter)?;

    reporter.done(format!(
        "Build completed in {:.2}s -> {}",
        start_time.elapsed().as_secs_f64(),
        outcome.artifact.output.display()
    ));

    Ok(())
}
