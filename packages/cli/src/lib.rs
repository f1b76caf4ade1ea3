//! # kvtree-cli
//!
//! Command-line front end for kvtree against an etcd server.
//!
//! ## Usage
//!
//! ```bash
//! # Materialize /stucco, once with full keys and once trimmed
//! kvtree nested /stucco
//! kvtree nested /stucco --trim
//!
//! # Plain key operations
//! kvtree set /stucco/name demo
//! kvtree get /stucco/name
//! kvtree --endpoint http://etcd:2379 keys /stucco
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kvtree_http::EtcdClient;

pub use commands::Command;
pub use config::Config;
pub use error::Error;

use crate::render::RenderOptions;

/// kvtree - materialize etcd subtrees
#[derive(Parser, Debug)]
#[command(name = "kvtree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// etcd base URL (default: $ETCD_ENDPOINT, else http://$ETCD_HOST:$ETCD_PORT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Never colorize output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "kvtree=info,kvtree_cli=info,kvtree_core=info,kvtree_http=info",
        1 => "kvtree=debug,kvtree_cli=debug,kvtree_core=debug,kvtree_http=debug",
        _ => "kvtree=trace,kvtree_cli=trace,kvtree_core=trace,kvtree_http=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the parsed command line, printing results to stdout.
pub fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::resolve(cli.endpoint.clone(), cli.timeout_secs);
    tracing::debug!(endpoint = %config.endpoint, "connecting");

    let client = EtcdClient::with_timeout(&config.endpoint, config.timeout)?;
    let options = RenderOptions {
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };

    if let Some(output) = commands::execute(&cli.command, &client, &options)? {
        print!("{}", output);
    }
    Ok(())
}
