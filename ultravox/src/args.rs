use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Ultravox transcription gateway
#[derive(Debug, Parser)]
#[command(name = "ultravox", about = "Streams audio transcription and translation from an OpenAI-compatible backend")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "ultravox.toml", env = "ULTRAVOX_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ULTRAVOX_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directives, e.g. `info,transcribe=debug`
    #[arg(long, default_value = "info", env = "ULTRAVOX_LOG")]
    pub log_filter: String,
}
