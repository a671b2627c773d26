use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,holdings_csv=info,dashboard_engine=info";

/// Installs the global fmt subscriber with the default filter.
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over `default_filter`.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with_default(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("Logging initialised");
    }
}
