/// TLVM command-line tool: inspect, validate, build and mutate TLV corpus
/// files for the structure-aware fuzzing mutator.
///
/// # Command overview
///
/// ```text
/// tlvm <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print a per-record summary of a TLV file
///   validate   Report every record the decoder would drop
///   encode     Create a TLV file from a JSON manifest
///   mutate     Run the custom mutator over a file
///   crossover  Splice two TLV files
///   bootstrap  Synthesize a fresh corpus seed
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Raise log level (-v debug, -vv trace); RUST_LOG wins
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                              |
/// |------|------------------------------------------------------|
/// | 0    | Success                                              |
/// | 1    | Error (I/O failure, bad manifest, failed validation) |
///
/// All error details and logs go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_bootstrap;
mod cmd_crossover;
mod cmd_encode;
mod cmd_inspect;
mod cmd_mutate;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Structure-aware TLV corpus tool.
#[derive(Parser)]
#[command(name = "tlvm", version, about = "TLV corpus mutator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise the log level: `-v` for debug, `-vv` for trace.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print a human-readable summary of each record in a TLV file.
    Inspect(InspectArgs),
    /// Check that every byte of a TLV file decodes to an accepted record.
    Validate(ValidateArgs),
    /// Create a TLV file from a JSON manifest.
    Encode(EncodeArgs),
    /// Mutate a TLV file the way the fuzzer hook would.
    Mutate(MutateArgs),
    /// Splice two TLV files the way the fuzzer hook would.
    Crossover(CrossoverArgs),
    /// Synthesize a fresh, valid TLV file.
    Bootstrap(BootstrapArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `tlvm inspect`.
///
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────────────┐
/// │ Flag        │ Effect                                               │
/// ├─────────────┼──────────────────────────────────────────────────────┤
/// │ --show-body │ Include first 80 chars of the payload (UTF-8 lossy)  │
/// │ --show-hex  │ Include 16-byte-per-line hex dump of the payload     │
/// │ --record N  │ Show only the record at index N                      │
/// └─────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the TLV file to inspect.
    pub file: PathBuf,

    /// Show payload content (first 80 characters, UTF-8 lossy).
    #[arg(long)]
    pub show_body: bool,

    /// Show raw hex dump of payloads (16 bytes per line).
    #[arg(long)]
    pub show_hex: bool,

    /// Inspect only the record at this zero-based index.
    #[arg(long)]
    pub record: Option<usize>,
}

/// Arguments for `tlvm validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the TLV file to validate.
    pub file: PathBuf,
}

/// Arguments for `tlvm encode`.
///
/// The manifest lists records in wire order:
///
/// ```json
/// {
///   "records": [
///     { "type": "URL",       "text": "http://localhost/" },
///     { "type": "NOBODY",    "hex": "00000001" },
///     { "type": 14,          "text": "garbage is allowed by id" }
///   ]
/// }
/// ```
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Path to the JSON manifest.
    pub input: PathBuf,

    /// Output TLV file path.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for `tlvm mutate`.
///
/// ```text
/// ┌────────────────┬──────────────────────────────────────────────────┐
/// │ Flag           │ Values / default                                 │
/// ├────────────────┼──────────────────────────────────────────────────┤
/// │ --seed         │ u32 seed for the engine and byte mutator (0)     │
/// │ --max-size     │ output budget in bytes (4096)                    │
/// │ --rounds       │ feed the output back in this many times (1)      │
/// │ --max-attempts │ dispatcher retries per round (10)                │
/// │ -o / --output  │ write bytes to file instead of a summary         │
/// └────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct MutateArgs {
    /// Path to the TLV file to mutate.
    pub file: PathBuf,

    #[arg(long, default_value_t = 0)]
    pub seed: u32,

    #[arg(long, default_value_t = 4096)]
    pub max_size: usize,

    /// Number of successive mutations; round `i` uses seed `seed + i`.
    #[arg(long, default_value_t = 1)]
    pub rounds: u32,

    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Write the mutated bytes here. Without it a record summary is printed.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `tlvm crossover`.
#[derive(clap::Args)]
pub struct CrossoverArgs {
    pub first: PathBuf,

    pub second: PathBuf,

    #[arg(long, default_value_t = 0)]
    pub seed: u32,

    #[arg(long, default_value_t = 4096)]
    pub max_size: usize,

    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for `tlvm bootstrap`.
#[derive(clap::Args)]
pub struct BootstrapArgs {
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Minimum encoded size to grow the collection to.
    #[arg(long, default_value_t = 1024)]
    pub budget: usize,

    #[arg(short, long)]
    pub output: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Mutate(args) => cmd_mutate::run(&args),
        Commands::Crossover(args) => cmd_crossover::run(&args),
        Commands::Bootstrap(args) => cmd_bootstrap::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install a stderr subscriber. `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
