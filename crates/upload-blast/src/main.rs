//! upload-blast - Batch multipart upload sender
//!
//! Usage:
//!   upload-blast --file clean.dat
//!   upload-blast -f clean.dat -c 100 -u http://localhost:6200/scan -p qqfile

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upload_blast::{run, BlastConfig};

#[derive(Parser, Debug)]
#[command(name = "upload-blast")]
#[command(about = "Fire a batch of multipart file uploads at an upload listener")]
struct Args {
    /// Number of requests to send
    #[arg(short, long, default_value_t = 1)]
    count: u32,

    /// URL to post to
    #[arg(short, long, default_value = "http://localhost:6200/upload")]
    url: String,

    /// File parameter name
    #[arg(short, long, default_value = "qqfile")]
    param: String,

    /// File to send
    #[arg(short, long)]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upload_blast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = BlastConfig {
        url: args.url,
        field: args.param,
        file: args.file,
        count: args.count,
    };

    tracing::info!(
        url = %config.url,
        field = %config.field,
        file = %config.file.display(),
        count = config.count,
        "Starting upload blast"
    );

    let report = run(&config).await?;

    tracing::info!(
        successes = report.successes,
        failures = report.failures,
        "Blast complete"
    );

    Ok(())
}
