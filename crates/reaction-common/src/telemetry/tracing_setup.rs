//! Tracing and logging setup
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::Environment;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    /// Emit one JSON object per event
    pub json: bool,
    /// Log span open/close, which shows per-operation latency
    pub span_events: bool,
    pub file_line: bool,
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Debug level, human readable, with span timings
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            span_events: true,
            thread_names: true,
            ..Self::default()
        }
    }

    /// Info level JSON for log shippers
    #[must_use]
    pub fn production() -> Self {
        Self {
            json: true,
            file_line: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Staging => Self::default(),
            Environment::Production => Self::production(),
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let spans = if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer()
            .with_file(self.file_line)
            .with_line_number(self.file_line)
            .with_thread_names(self.thread_names)
            .with_span_events(spans);

        if self.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    }
}

/// Install the global subscriber
///
/// # Panics
/// Panics if a global subscriber is already set.
pub fn init_tracing(config: TracingConfig) {
    if let Err(e) = try_init_tracing(config) {
        panic!("{e}");
    }
}

/// Install the global subscriber unless one already exists
pub fn try_init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(env_filter)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_presets() {
        let dev = TracingConfig::for_environment(Environment::Development);
        assert_eq!(dev.level, Level::DEBUG);
        assert!(!dev.json);
        assert!(dev.span_events);

        let prod = TracingConfig::for_environment(Environment::Production);
        assert_eq!(prod.level, Level::INFO);
        assert!(prod.json);
        assert!(!prod.file_line);

        let staging = TracingConfig::for_environment(Environment::Staging);
        assert!(!staging.json);
        assert!(staging.file_line);
    }

    #[test]
    fn test_second_init_is_reported() {
        let _ = try_init_tracing(TracingConfig::default());
        assert!(matches!(
            try_init_tracing(TracingConfig::default()),
            Err(TracingError::AlreadyInitialized)
        ));
    }
}
