//! Logger setup for the host binary
//!
//! The raster and game modules never log per pixel; only the host and the
//! frame driver's state changes go through the `log` facade.

use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` sets one
///
/// rumqttc reports every reconnect attempt at info, which would flood the
/// console while a broker is down.
pub const DEFAULT_FILTER: &str = "trifill=info,rumqttc=warn";

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter syntax; overrides `RUST_LOG` when set
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Millisecond timestamps, handy next to the FPS lines
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: true,
        }
    }
}

/// Pick the filter string: explicit config, then the environment, then
/// `DEFAULT_FILTER`. Blank values count as unset.
fn resolve_filter(explicit: Option<String>, env: Option<String>) -> String {
    explicit
        .into_iter()
        .chain(env)
        .find(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

static INIT: Once = Once::new();

/// Install the global logger; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).write_style(config.write_style);
        if config.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }

        // Tests may have installed a logger already
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter '{}'", filter);
        }
    });
}
