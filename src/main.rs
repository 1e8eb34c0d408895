use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use eyre::{Result, WrapErr, bail};
use log::{error, info};

mod cli;

use cli::Cli;
use ytsent::config::{self, Config, DEFAULT_HOST, DEFAULT_INDEX_PATH, DEFAULT_PORT};
use ytsent::sentiment::SentimentClassifier;
use ytsent::server::{AppState, Upstream};
use ytsent::youtube::{CommentFetcher, YouTubeClient};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytsent.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytsent")
        .join("logs")
}

fn build_after_help() -> String {
    let key_line = if std::env::var(config::API_KEY_ENV).is_ok_and(|v| !v.is_empty()) {
        format!("  \x1b[32m✅\x1b[0m {}", config::API_KEY_ENV)
    } else {
        format!(
            "  \x1b[31m❌\x1b[0m {}  (not set; falls back to api_key in {})",
            config::API_KEY_ENV,
            config::config_path().display()
        )
    };

    let log_path = log_dir().join("ytsent.log");

    format!(
        "\nCREDENTIALS:\n{key_line}\n\nLogs are written to: {}",
        log_path.display()
    )
}

/// Build the comment source, or record why it is unavailable
fn build_upstream(config: &Config, classifier: Arc<SentimentClassifier>) -> Upstream {
    let Some(api_key) = config.resolve_api_key() else {
        return Upstream::Unavailable(format!("{} not set and no api_key in config", config::API_KEY_ENV));
    };

    match YouTubeClient::new(&api_key, config.api_base_url.as_deref()) {
        Ok(client) => Upstream::Ready(CommentFetcher::new(Arc::new(client), classifier)),
        Err(e) => Upstream::Unavailable(e.to_string()),
    }
}

/// Resolve `host` (IP literal or hostname) to the first address it maps to
async fn resolve_bind_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let mut addrs = tokio::net::lookup_host((host, port))
        .await
        .wrap_err_with(|| format!("invalid host: {host}"))?;
    match addrs.next() {
        Some(addr) => Ok(addr),
        None => bail!("host {host} resolved to no addresses"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    setup_logging(cli.verbose)?;

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let classifier = Arc::new(SentimentClassifier::default());
    let upstream = build_upstream(&config, classifier);

    match &upstream {
        Upstream::Ready(_) => info!("YouTube API initialized successfully"),
        Upstream::Unavailable(reason) if cli.require_api => {
            bail!("YouTube API not initialized: {reason}");
        }
        Upstream::Unavailable(reason) => {
            error!("YouTube API not initialized: {reason}");
            eprintln!("warning: YouTube API not initialized ({reason}); /analyze_comments/ will return 500");
        }
    }

    // CLI flags take priority over the config file
    let host = cli.host.or(config.host).unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = cli.port.or(config.port).unwrap_or(DEFAULT_PORT);
    let index_path = cli
        .index
        .or(config.index_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH));

    let state = AppState { upstream, index_path };
    let app = ytsent::server::router(state);

    let addr = resolve_bind_addr(&host, port).await?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("binding to {addr}"))?;
    info!("Listening on http://{addr}");
    eprintln!("ytsent listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("running API server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {e}");
    }
    info!("Shutting down");
}
