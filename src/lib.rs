pub mod client;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod page;
pub mod render;
pub mod server;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber (stderr, `RUST_LOG` aware).
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "pharmadash=debug,pharmadash_lib=debug,warn"
    } else {
        config::default_log_filter()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);
}
