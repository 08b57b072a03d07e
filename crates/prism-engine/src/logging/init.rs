use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "prism_studio=debug,wgpu_core=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Picks the filter string: explicit config, then `RUST_LOG`, then `None`
/// (meaning "info").
pub fn resolve_filter(explicit: Option<&str>, env: Option<&str>) -> Option<String> {
    fn usable(f: Option<&str>) -> Option<&str> {
        f.map(str::trim).filter(|f| !f.is_empty())
    }

    usable(explicit).or_else(|| usable(env)).map(str::to_owned)
}

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let env = std::env::var("RUST_LOG").ok();
        match resolve_filter(config.env_filter.as_deref(), env.as_deref()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.write_style(config.write_style);

        // A second logger may already be installed by a test harness.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}
