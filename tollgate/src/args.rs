use std::path::PathBuf;

use clap::Parser;

/// Tollgate metered request gateway
#[derive(Debug, Parser)]
#[command(name = "tollgate", about = "Metered billing gateway for hosted AI APIs")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tollgate.toml", env = "TOLLGATE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "TOLLGATE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
