use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use ytmrss::Config;

#[derive(Parser, Debug)]
#[command(name = "ytmrss", about = "Serve YouTube channel feeds as Media RSS")]
struct Args {
    /// Listen port (overrides the PORT environment variable)
    #[arg(long)]
    port: Option<u16>,

    /// Static file directory (overrides the STATIC_DIR environment variable)
    #[arg(long, value_name = "DIR")]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = static_dir;
    }

    ytmrss::run_server(config).await
}
