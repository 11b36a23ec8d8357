//! CLI parser and command dispatch.

mod query;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "morgan-search")]
#[command(about = "Search the Morgan manuscript collection through Islandora Solr")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Solr request URL for a set of search form fields
    Query {
        /// Form fields as key=value pairs (e.g. query="ship logs" exclude_letters=true)
        #[arg(value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// Result offset (overrides --page)
        #[arg(short, long)]
        start: Option<usize>,
        /// 1-based result page
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// URL of the search page, used to build pagination links
        #[arg(long, default_value = "/search")]
        url: String,
        /// Print the query before percent-encoding
        #[arg(long)]
        raw: bool,
    },

    /// Start the web server
    Serve {
        /// Bind address: port, host, or host:port (defaults to the config value)
        #[arg(short, long, env = "MORGAN_SEARCH_BIND")]
        bind: Option<String>,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_with_override(cli.config.as_deref()).await?;
    match &config.source_path {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::debug!("No config file found, using defaults"),
    }

    match cli.command {
        Commands::Query {
            fields,
            start,
            page,
            url,
            raw,
        } => query::cmd_query(&config, &fields, start, page, &url, raw),
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            serve::cmd_serve(&config, &bind).await
        }
    }
}
