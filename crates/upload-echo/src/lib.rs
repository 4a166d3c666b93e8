//! upload-echo - Upload echo listener
//!
//! A small test server for exercising file-forwarding clients during
//! development: it accepts any POST request, looks for a multipart file
//! field, prints the file contents to a console sink between marker lines,
//! and always answers `It works!`.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use upload_echo::{create_router, AppState, StdoutSink};
//!
//! let state = AppState::new(Arc::new(StdoutSink));
//! let router = create_router(state);
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod sink;
pub mod state;
pub mod testing;

pub use error::ApiError;
pub use handlers::{FILE_MARKER, UPLOAD_FIELD};
pub use sink::{ConsoleSink, StdoutSink};
pub use state::AppState;

use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Port the standalone listener binds to.
pub const LISTEN_PORT: u16 = 6200;

/// Create the upload echo router with the given application state.
///
/// Every POST, on any path, goes to the upload handler. No other routes
/// exist, so non-POST requests get the framework's default rejection.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::receive_upload))
        .route("/{*path}", post(handlers::receive_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
