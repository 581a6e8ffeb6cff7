use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "ant-e is for Executing Ant targets.", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version and feature flags in JSON format.
    #[arg(
        long,
        short = 'v',
        help = "Print version and feature flags in JSON format."
    )]
    pub version: bool,

    #[arg(
        long,
        short = 'C',
        value_name = "DIR",
        help = "Workspace root holding .ant-e.toml (default: current directory)."
    )]
    pub workspace: Option<PathBuf>,

    #[arg(
        long,
        default_value = crate::e_command_builder::DEFAULT_ANT,
        value_name = "BIN",
        help = "Build tool executable."
    )]
    pub ant: String,

    #[arg(
        long,
        default_value = crate::e_findtarget::DEFAULT_EDITOR,
        value_name = "BIN",
        help = "Editor used to open a target's declaration."
    )]
    pub editor: String,

    #[arg(
        long,
        value_name = "PATH",
        help = "Write log output (RUST_LOG) to a file instead of stderr."
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "wait",
        short = 'W',
        default_value_t = 5,
        help = "Seconds to wait after a build before returning (default: 5)."
    )]
    pub wait: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive panel (the default).
    Tui,
    /// Print the targets of the configured build file.
    List {
        #[arg(long, short = 'p', help = "Only targets with a description.")]
        primary: bool,
        #[arg(long, short = 's', value_name = "QUERY", help = "Case-insensitive name/description filter.")]
        search: Option<String>,
        #[arg(long, help = "Print JSON instead of a table.")]
        json: bool,
    },
    /// Run a target in the terminal.
    Run {
        target: String,
        #[arg(long, help = "Print the command instead of running it.")]
        dry_run: bool,
    },
    /// Open the editor on a target's declaration.
    Open { target: String },
    /// Choose the build file; picks from *.xml files when PATH is omitted.
    Configure { path: Option<PathBuf> },
}

/// Print the version and the JSON array of feature flags.
pub fn print_version_and_features() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown");
    let json_features = format!(
        "[{}]",
        get_feature_flags()
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect::<Vec<String>>()
            .join(", ")
    );
    println!("ant-e {}", version);
    println!("{}", json_features);
}

/// Returns a vector of feature flag strings.
/// Enabled features are listed as-is while disabled ones are prefixed with "!".
pub fn get_feature_flags() -> Vec<&'static str> {
    let mut flags = Vec::new();
    if cfg!(feature = "tui") {
        flags.push("tui");
    } else {
        flags.push("!tui");
    }
    if cfg!(feature = "uses_serde") {
        flags.push("uses_serde");
    } else {
        flags.push("!uses_serde");
    }
    flags
}
