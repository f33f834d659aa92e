use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use release_lines::config::{self, Config};
use release_lines::input::read_targets;
use release_lines::output::{OutputFormat, WriterSink};
use release_lines::release::github::GitHubReleases;
use release_lines::release::resolver::resolve_all;

#[derive(Parser)]
#[command(name = "release-lines")]
#[command(
    version,
    about = "List the latest release of every major.minor line of GitHub repositories"
)]
struct Cli {
    /// Repository list: a header line, then `owner/name,minVersion` per line
    repositories: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Releases requested per page (1-100)
    #[arg(long)]
    per_page: Option<u32>,

    /// Attempts per page before a repository is given up
    #[arg(long)]
    max_attempts: Option<u32>,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to a file instead of stderr (defaults to the data directory)
    #[arg(long)]
    log_file: Option<Option<PathBuf>>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.github.base_url = base_url.clone();
        }
        if let Some(per_page) = self.per_page {
            config.github.per_page = per_page;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.fetch.max_attempts = max_attempts;
        }
        if self.token.is_some() {
            config.github.token = self.token.clone();
        }

        Ok(config)
    }
}

fn init_logging(
    verbose: u8,
    log_file: Option<Option<PathBuf>>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let path = path.unwrap_or_else(config::log_path);
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {:?}", dir))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("Log path {:?} has no file name", path))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.load_config()?;
    let rows = read_targets(&cli.repositories)?;
    let source = GitHubReleases::from_config(&config).context("Failed to create HTTP client")?;

    info!(
        "Resolving {} repositories against {}",
        rows.len(),
        config.github.base_url
    );

    let mut sink = WriterSink::stdio(cli.format);
    let failures = resolve_all(&source, rows, &config.fetch_policy(), &mut sink).await;

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_file.clone())?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
