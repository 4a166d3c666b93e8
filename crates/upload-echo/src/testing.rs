//! Test utilities for upload-echo
//!
//! Provides an in-process server and a capturing console sink so tests can
//! assert on the echoed output without touching process stdout.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::sink::ConsoleSink;

/// Console sink that records everything written to it.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// server state and keep the other for assertions.
#[derive(Clone, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as raw bytes.
    pub fn contents(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }
}

impl ConsoleSink for CaptureSink {
    fn line(&self, line: &str) -> io::Result<()> {
        let mut buf = self.buffer.lock();
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        Ok(())
    }

    fn raw(&self, bytes: &[u8]) -> io::Result<()> {
        let mut buf = self.buffer.lock();
        buf.extend_from_slice(bytes);
        if !bytes.ends_with(b"\n") {
            buf.push(b'\n');
        }
        Ok(())
    }
}

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Start an axum Router on a random local port
    ///
    /// # Example
    ///
    /// ```ignore
    /// use std::sync::Arc;
    /// use upload_echo::testing::{CaptureSink, TestServer};
    /// use upload_echo::{create_router, AppState};
    ///
    /// let sink = CaptureSink::new();
    /// let state = AppState::new(Arc::new(sink.clone()));
    /// let server = TestServer::start(create_router(state)).await?;
    ///
    /// // POST to server.base_url(), then assert on sink.contents_string()
    /// ```
    pub async fn start(router: axum::Router) -> io::Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
