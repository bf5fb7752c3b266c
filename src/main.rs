use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

use issue_tally::snapshot::{CacheMode, SnapshotStore, DEFAULT_SNAPSHOT_FILE};

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_AUTH: i32 = 3;
const EXIT_CONFIG: i32 = 4;
const EXIT_PARTIAL: i32 = 5;

#[derive(Parser, Debug)]
#[command(name = "issue-tally")]
#[command(about = "Daily open/closed report of a GitHub repository's issues and pull requests", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase logging (-v progress, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file (defaults to ~/.config/issue-tally/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository owner (overrides config)
    #[arg(long)]
    owner: Option<String>,

    /// Repository name (overrides config)
    #[arg(long)]
    repo: Option<String>,

    /// Snapshot file (overrides config, default issues.json)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// How to combine the snapshot file with the GitHub API
    #[arg(long, value_enum)]
    cache_mode: Option<CacheMode>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit non-zero when the run recorded any problem
    #[arg(long)]
    strict: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        log::debug!("rustls crypto provider already installed");
    }

    // Load config, then let flags override it
    let mut config = match issue_tally::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(owner) = cli.owner {
        config.repository.owner = owner;
    }
    if let Some(repo) = cli.repo {
        config.repository.name = repo;
    }
    if let Some(snapshot) = cli.snapshot {
        config.snapshot = Some(snapshot);
    }
    if let Some(mode) = cli.cache_mode {
        config.cache_mode = mode;
    }

    if let Err(errors) = issue_tally::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let store = SnapshotStore::new(
        config
            .snapshot
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE)),
    );
    let mode = config.cache_mode;
    log::info!(
        "Repository {}, snapshot {}, cache mode {:?}",
        config.repository,
        store.path().display(),
        mode
    );

    // The token is only needed when the run may reach GitHub
    let token = if mode.needs_network() {
        match issue_tally::credentials::require_token() {
            Ok(t) => Some(t),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(EXIT_AUTH);
            }
        }
    } else {
        None
    };

    let (snapshot, diagnostics) = match token {
        Some(token) => {
            let client = match issue_tally::github::create_client(&token, config.api_url.as_deref()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Failed to create GitHub client: {:#}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            };
            let pages = issue_tally::github::GitHubPages::new(&client, &config.repository);
            issue_tally::fetch::load_snapshot(&pages, &store, mode).await
        }
        None => issue_tally::fetch::load_cached(&store),
    };

    let tally = issue_tally::tally::tally(&snapshot.items);
    let use_colors = !cli.no_color && issue_tally::output::should_use_colors();

    println!(
        "{}",
        issue_tally::output::format_report(&tally, chrono::Utc::now(), use_colors)
    );

    if !diagnostics.is_empty() {
        eprintln!();
        let stderr_colors = !cli.no_color && issue_tally::output::should_use_colors_stderr();
        eprintln!("{}", issue_tally::output::format_diagnostics(&diagnostics, stderr_colors));
    }

    log::debug!("Reported {} items in {:?}", snapshot.len(), start_time.elapsed());

    if cli.strict && !diagnostics.is_empty() {
        std::process::exit(EXIT_PARTIAL);
    }
    std::process::exit(EXIT_SUCCESS);
}
