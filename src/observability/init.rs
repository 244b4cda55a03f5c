//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber for the controller.
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. `RUST_LOG` environment variable if set
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times (only the first call takes
/// effect). Hosts that install their own subscriber can skip this entirely;
/// every span and event in the crate goes through the `tracing` facade.
///
/// # Example
///
/// ```rust
/// use jobdeck::observability::init_tracing;
/// use jobdeck::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));

    let _ = subscriber.try_init();
}
