use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rconf")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Declarative RESTCONF configuration for network devices", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Make device config match every state in a state file
    Apply(ApplyArgs),

    /// Preview what apply would change (same as apply --dry-run)
    Diff(DiffArgs),

    /// Check a state file without contacting the device
    Validate {
        /// State file (TOML or JSON)
        file: PathBuf,
    },

    /// Fetch and print the config at a RESTCONF URI
    Get(GetArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Apply / Diff
// ============================================================================

#[derive(Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Dry run - show what would change without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args)]
pub struct RunArgs {
    /// State file (TOML or JSON)
    pub file: PathBuf,

    /// Only reconcile the state with this name
    #[arg(long)]
    pub only: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

// ============================================================================
// Get
// ============================================================================

#[derive(Args)]
pub struct GetArgs {
    /// RESTCONF URI to read
    pub uri: String,

    /// State file whose [device] section to use
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub device: DeviceArgs,
}

// ============================================================================
// Device overrides
// ============================================================================

#[derive(Args, Default)]
pub struct DeviceArgs {
    /// Device host (overrides the state file)
    #[arg(long)]
    pub host: Option<String>,

    /// Username for basic auth
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password for basic auth
    #[arg(long, env = "RCONF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Use plain HTTP instead of HTTPS
    #[arg(long)]
    pub plain_http: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}
