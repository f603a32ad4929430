use std::sync::Once;

/// Filter applied when neither `env_filter` nor `RUST_LOG` is set.
///
/// wgpu is chatty at info level; keep it at warnings.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "glsurface_engine=debug,wgpu_core=warn"). Set it to
/// `glsurface_engine=debug` to see the FPS and surface-size diagnostics.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
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

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. An explicit `env_filter` wins over `RUST_LOG`.
/// If another logger was already installed, the error is swallowed.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter {
            Some(filter) => builder.parse_filters(&filter),
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => builder.parse_filters(&filter),
                Err(_) => builder.parse_filters(DEFAULT_FILTER),
            },
        };

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
