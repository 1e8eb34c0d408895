use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytsent",
    about = "YouTube comment sentiment API server",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Address or hostname to bind (overrides config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Landing page served at /
    #[arg(short, long)]
    pub index: Option<PathBuf>,

    /// Alternate config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exit at startup if the YouTube client cannot be initialized
    #[arg(long)]
    pub require_api: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    pub verbose: bool,
}
