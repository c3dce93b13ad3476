use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use weighted_wins::run::RunOutcome;
use weighted_wins::RankingError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_VALIDATION: i32 = 3;
const EXIT_CONFIG: i32 = 4;
const EXIT_PERSISTENCE: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    /// Aligned table of the top teams
    #[default]
    Table,
    /// Tab-separated values, every team, no header
    Tsv,
    /// The snapshot JSON
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the schedule, compute rankings and save the weekly snapshot (default)
    Calculate {
        /// Read games from a local CSV or JSON file instead of the remote feed
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Skip the on-disk schedule cache
        #[arg(long)]
        no_cache: bool,

        /// Compute and print rankings without writing a snapshot
        #[arg(long)]
        dry_run: bool,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print a saved snapshot
    Show {
        /// Week to show (defaults to the latest saved week)
        week: Option<u32>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Remove the cached schedule feed
    ClearCache,
}

#[derive(Parser, Debug)]
#[command(name = "weighted-wins")]
#[command(about = "Weekly NFL power rankings by weighted wins", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/weighted-wins/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Season year, overrides the config file
    #[arg(long, global = true)]
    season: Option<u32>,

    /// Snapshot directory, overrides the config file
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Pick an exit code from the typed error at the root of the chain
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RankingError>() {
        Some(e) if e.is_validation() => EXIT_VALIDATION,
        Some(RankingError::Fetch { .. }) => EXIT_NETWORK,
        Some(RankingError::Persistence { .. }) => EXIT_PERSISTENCE,
        _ => EXIT_CONFIG,
    }
}

fn print_snapshot(snapshot: &weighted_wins::snapshot::Snapshot, format: OutputFormat, top: usize) {
    match format {
        OutputFormat::Table => {
            let use_colors = weighted_wins::output::should_use_colors();
            println!("{}", weighted_wins::output::format_title(snapshot));
            println!(
                "{}",
                weighted_wins::output::format_rankings_table(&snapshot.rankings, top, use_colors)
            );
        }
        OutputFormat::Tsv => {
            println!("{}", weighted_wins::output::format_tsv(&snapshot.rankings));
        }
        OutputFormat::Json => match serde_json::to_string_pretty(snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize snapshot: {}", e);
                std::process::exit(EXIT_PERSISTENCE);
            }
        },
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Calculate {
        input: None,
        no_cache: false,
        dry_run: false,
        format: OutputFormat::Table,
    });
    let start_time = Instant::now();

    // Load config, then apply command line overrides
    let mut config = match weighted_wins::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(season) = cli.season {
        config.season = season;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    if let Err(errors) = weighted_wins::config::validate_config(&config) {
        error!("Config errors:");
        for error in errors {
            error!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match command {
        Commands::Calculate {
            input,
            no_cache,
            dry_run,
            format,
        } => {
            let options = weighted_wins::schedule::LoadOptions {
                input,
                use_cache: !no_cache,
            };

            match weighted_wins::run::run(&config, &options, dry_run).await {
                Ok(RunOutcome::Ranked { snapshot, path }) => {
                    print_snapshot(&snapshot, format, config.top);
                    if let Some(path) = path {
                        info!("Saved {}", path.display());
                    }
                    info!("Calculation complete in {:?}", start_time.elapsed());
                }
                Ok(RunOutcome::Skipped(reason)) => {
                    info!("{}. Exiting.", reason);
                }
                Err(e) => {
                    error!("{:#}", e);
                    std::process::exit(exit_code_for(&e));
                }
            }
        }
        Commands::Show { week, format } => {
            let dir = &config.output_dir;
            let week = match week {
                Some(w) => w,
                None => match weighted_wins::snapshot::latest_snapshot_week(dir) {
                    Ok(Some(w)) => w,
                    Ok(None) => {
                        error!("No snapshots found in {}", dir.display());
                        std::process::exit(EXIT_PERSISTENCE);
                    }
                    Err(e) => {
                        error!("{:#}", e);
                        std::process::exit(EXIT_PERSISTENCE);
                    }
                },
            };

            let path = weighted_wins::snapshot::snapshot_path(dir, week);
            match weighted_wins::snapshot::load_snapshot(&path) {
                Ok(snapshot) => print_snapshot(&snapshot, format, config.top),
                Err(e) => {
                    error!("{:#}", e);
                    std::process::exit(EXIT_PERSISTENCE);
                }
            }
        }
        Commands::ClearCache => {
            let cache_path = weighted_wins::schedule::cache::get_cache_path();
            if let Err(e) = weighted_wins::schedule::cache::clear_cache(&cache_path) {
                error!("{:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Cleared schedule cache at {}", cache_path.display());
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
