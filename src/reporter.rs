use colored::*;
use std::fmt::Display;

/// Progress and diagnostics sink shared by all build stages.
///
/// Informational output goes to stdout and only in verbose mode. Errors are
/// always written to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn info(&self, msg: impl Display) {
        if self.verbose {
            println!("{} {}", "[INFO]".cyan(), msg);
        }
    }

    /// Non-fatal problem; only surfaced in verbose mode.
    pub fn warn(&self, msg: impl Display) {
        if self.verbose {
            eprintln!("{} {}", "[WARN]".yellow(), msg);
        }
    }

    pub fn done(&self, msg: impl Display) {
        if self.verbose {
            println!("{} {}", "[DONE]".green().bold(), msg);
        }
    }

    /// Print an error together with its cause chain.
    pub fn error(&self, err: &anyhow::Error) {
        eprintln!("{} {}", "[ERROR]".red().bold(), err);
        for cause in err.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
    }
}
