//! Application state for the upload echo listener

use std::sync::Arc;

use crate::sink::{ConsoleSink, StdoutSink};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where echoed uploads go
    sink: Arc<dyn ConsoleSink>,
}

impl AppState {
    /// Create a new AppState writing to the given sink
    pub fn new(sink: Arc<dyn ConsoleSink>) -> Self {
        Self { sink }
    }

    /// Create a new AppState writing to stdout
    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink))
    }

    pub fn sink(&self) -> &dyn ConsoleSink {
        self.sink.as_ref()
    }
}
