//! Telemetry setup
//!
//! Installs the global tracing subscriber. `RUST_LOG` takes precedence over
//! the configured level when set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose per-object confirmations are gated behind extended logging
const CONTENT_CRATES: [&str; 4] = [
    "contentlib_core",
    "contentlib_service",
    "contentlib_loader",
    "contentlib_host",
];

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub extended: bool,
    pub json_format: bool,
    pub include_timestamps: bool,
    pub include_thread_ids: bool,
    pub include_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            extended: false,
            json_format: false,
            include_timestamps: true,
            include_thread_ids: false,
            include_target: true,
        }
    }
}

impl TelemetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Raise the content crates to debug
    pub fn with_extended(mut self, enabled: bool) -> Self {
        self.extended = enabled;
        self
    }

    pub fn with_json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.include_timestamps = enabled;
        self
    }

    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.include_thread_ids = enabled;
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.include_target = enabled;
        self
    }

    /// Filter directives for this configuration
    pub fn directives(&self) -> String {
        let mut directives = self.log_level.clone();
        if self.extended {
            for krate in CONTENT_CRATES {
                directives.push_str(&format!(",{}=debug", krate));
            }
        }
        directives
    }
}

/// Initialize telemetry with custom configuration
pub fn init_with_config(config: TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()));

    if config.json_format {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(config.include_target)
                    .with_thread_ids(config.include_thread_ids),
            )
            .init();
    } else if config.include_timestamps {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_timer(fmt::time::SystemTime)
                    .with_target(config.include_target)
                    .with_thread_ids(config.include_thread_ids),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(config.include_target)
                    .with_thread_ids(config.include_thread_ids),
            )
            .init();
    }
}
