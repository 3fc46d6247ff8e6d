use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` names one: this crate at info, the rest at
/// warn.
pub const DEFAULT_FILTER: &str = "warn,primray=info";

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax, e.g. "warn" or "primray=debug".
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Prefix each record with a timestamp. Off by default; hit reports are short-lived runs.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter<S: Into<String>>(filter: S) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// The filter in effect: the configured one, then `from_env`, then `DEFAULT_FILTER`.
    fn resolve_filter(&self, from_env: Option<String>) -> String {
        self.env_filter.clone()
            .or(from_env)
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger, writing to stderr. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolve_filter(std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).write_style(config.write_style);
        if !config.timestamps {
            builder.format_timestamp(None);
        }

        // A test harness may have installed its own logger already.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter `{}`", filter);
        }
    });
}
