//! Logger setup. Everything else logs through the `log` macros.

use std::sync::Once;

#[derive(Clone, Debug)]
/// Logger configuration.
pub struct LoggingConfig {
    /// `env_logger` filter string such as `"info"` or `"sphray=debug"`. Falls back to
    /// `RUST_LOG`, then `info`.
    pub filter: Option<String>,
    /// Whether to colour output.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Install the global logger. Later calls do nothing.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.write_style(config.write_style);

        if let Err(error) = builder.try_init() {
            eprintln!("Logger already installed: {error}");
        }

        log::debug!("Logging initialized");
    });
}
