use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

pub fn setup_tracing_to_stdout(filter: impl Into<LevelFilter>) {
    fmt().with_max_level(filter).init();
}

/// Like [`setup_tracing_to_stdout`], but `RUST_LOG` overrides the given
/// default filter.
pub fn setup_tracing_from_env(default: impl Into<LevelFilter>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default.into().to_string()));
    fmt().with_env_filter(filter).init();
}
