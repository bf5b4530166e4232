//! reflect-assert: structural comparison of JSON and YAML documents
//!
//! Compares two documents with the reflection comparator under a chosen set
//! of leniency modes and reports the first difference.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use reflect_assert::{
    cli,
    comparator::ComparatorMode,
    config::{AppConfig, ConfigOverrides, ConfigPreset, OutputFormat},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reflect-assert")]
#[command(version)]
#[command(about = "Structural comparison of JSON and YAML documents", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Documents are equal
    1  Documents differ
    2  Error occurred

EXAMPLES:
    # Strict comparison
    reflect-assert compare expected.json actual.json

    # Ignore element order and defaults in the expected document
    reflect-assert compare expected.yaml actual.yaml --lenient

    # Machine-readable report
    reflect-assert compare expected.json actual.json --mode lenient-order --format json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `compare` subcommand
#[derive(Parser)]
struct CompareArgs {
    /// Expected document
    left: PathBuf,

    /// Actual document
    right: PathBuf,

    /// Leniency mode to enable (repeatable)
    #[arg(short, long = "mode", value_enum)]
    modes: Vec<ComparatorMode>,

    /// Use the configured lenient modes
    #[arg(long)]
    lenient: bool,

    /// Start from a named preset (strict, lenient, loose)
    #[arg(long)]
    preset: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Read RFC 3339 strings as dates
    #[arg(long, overrides_with = "no_parse_dates")]
    parse_dates: bool,

    /// Keep RFC 3339 strings as strings
    #[arg(long, overrides_with = "parse_dates")]
    no_parse_dates: bool,

    /// Maximum object depth shown in reports
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum elements shown per collection in reports
    #[arg(long)]
    max_elements: Option<usize>,

    /// Print nothing; only set the exit status
    #[arg(short, long, overrides_with = "no_quiet")]
    quiet: bool,

    /// Print the report even when the config file sets quiet
    #[arg(long, overrides_with = "quiet")]
    no_quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two JSON or YAML documents
    Compare(CompareArgs),

    /// List registered mode combinations and their comparators
    Modes,

    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Show where configuration files are searched for
    Path,
    /// Write an example .reflect-assert.yaml to the current directory
    Init,
}

impl CompareArgs {
    /// Settings named explicitly on the command line.
    fn overrides(&self) -> Result<ConfigOverrides> {
        let preset = self
            .preset
            .as_deref()
            .map(|name| {
                ConfigPreset::from_name(name).with_context(|| {
                    let valid: Vec<&str> = ConfigPreset::all().iter().map(|p| p.name()).collect();
                    format!("unknown preset '{name}', expected one of: {}", valid.join(", "))
                })
            })
            .transpose()?;
        Ok(ConfigOverrides {
            preset,
            modes: self.modes.clone(),
            lenient: self.lenient,
            parse_dates: flag(self.parse_dates, self.no_parse_dates),
            max_depth: self.max_depth,
            max_elements: self.max_elements,
            format: self.format,
            quiet: flag(self.quiet, self.no_quiet),
        })
    }

    /// Configuration from file, then flags on top.
    fn resolve_config(&self, config_path: Option<&std::path::Path>) -> Result<AppConfig> {
        let overrides = self.overrides()?;
        let (config, loaded_from) = AppConfig::from_file_with_overrides(config_path, &overrides);
        if let Some(path) = loaded_from {
            tracing::debug!("Loaded config from {}", path.display());
        }
        Ok(config)
    }
}

/// `Some` only when one of a `--x` / `--no-x` pair was given.
const fn flag(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(cli::EXIT_ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Compare(args) => {
            let config = args.resolve_config(cli.config.as_deref())?;
            cli::run_compare(&args.left, &args.right, &config)
        }

        Commands::Modes => {
            cli::run_modes()?;
            Ok(0)
        }

        Commands::Schema { output } => {
            let schema = reflect_assert::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(0)
        }

        Commands::Config { action } => {
            run_config_action(action, cli.config.as_deref())?;
            Ok(0)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "reflect-assert", &mut io::stdout());
            Ok(0)
        }
    }
}

fn run_config_action(action: ConfigAction, explicit: Option<&std::path::Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = reflect_assert::config::load_or_default(explicit);
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("reflect-assert").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            match reflect_assert::config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".reflect-assert.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = reflect_assert::config::generate_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
