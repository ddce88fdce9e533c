use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// Terminal client for a local RAG chatbot backend.
#[derive(Debug, Parser)]
#[command(name = "ragchat", version)]
pub struct CliArgs {
    /// Backend base url, e.g. http://localhost:8000
    #[arg(long, value_name = "URL")]
    pub backend_url: Option<String>,

    /// RON config file (defaults to ./ragchat.ron when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum, value_name = "DEST")]
    pub log: Option<LogDestination>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// PDF to upload right after startup
    #[arg(value_name = "PDF")]
    pub pdf: Option<PathBuf>,
}
