use clap::{Arg, ArgAction, Parser};
use std::path::PathBuf;

/// Command line surface of `sdkb`.
///
/// Short flags mirror the Tizen SDK builder conventions. Every option is
/// optional here; defaults are applied later when merging with the config file.
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Package a Tizen web application into a signed .wgt widget",
    long_about = None,
    disable_version_flag = true,
    arg(Arg::new("version").long("version").action(ArgAction::Version).help("Print version"))
)]
pub struct Cli {
    /// Input folder of your Tizen SDK project
    #[arg(short = 'i', value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Tizen SDK (Eclipse) workspace location [default: .]
    #[arg(short = 'w', value_name = "PATH")]
    pub workspace: Option<PathBuf>,

    /// Output folder for the produced .wgt [default: .]
    #[arg(short = 'O', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Tizen CLI executable, usually tizen-sdk/tools/ide/bin/tizen [default: tizen]
    #[arg(short = 't', value_name = "PATH")]
    pub tizen_cli: Option<PathBuf>,

    /// Location of profiles.xml; `!WORKSPACE!` is replaced by the workspace path
    #[arg(short = 'p', value_name = "PATH")]
    pub profiles: Option<String>,

    /// Signing profile name as declared in profiles.xml [default: default]
    #[arg(short = 'n', value_name = "NAME")]
    pub profile_name: Option<String>,

    /// Print the contents of profiles.xml and exit
    #[arg(short = 'P', default_value_t = false)]
    pub display_profiles: bool,

    /// Verbose progress output
    #[arg(short = 'V', default_value_t = false)]
    pub verbose: bool,

    /// Minify JavaScript assets before packaging
    #[arg(short = 'o', default_value_t = false)]
    pub obfuscate: bool,

    /// JavaScript minifier executable [default: yuicompressor]
    #[arg(long, value_name = "PATH")]
    pub minifier: Option<PathBuf>,

    /// Defaults file [default: tizen-builder.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Parent directory of the temporary build folder [default: .]
    #[arg(long, value_name = "PATH")]
    pub staging_root: Option<PathBuf>,

    /// Extra arguments, accepted and ignored
    #[arg(value_name = "ARGS")]
    pub arguments: Vec<String>,
}
