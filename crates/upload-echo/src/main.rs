//! upload-echo - Upload echo listener
//!
//! Accepts any POST request on port 6200, prints the contents of the
//! `qqfile` multipart field to stdout between marker lines, and replies
//! `It works!`. Built for exercising a file-forwarding client during
//! development; there is nothing to configure beyond `RUST_LOG`.

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upload_echo::{create_router, AppState, LISTEN_PORT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upload_echo=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = create_router(AppState::stdout());

    let addr = SocketAddr::from(([0, 0, 0, 0], LISTEN_PORT));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
