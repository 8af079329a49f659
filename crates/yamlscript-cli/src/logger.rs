//! Logging setup for the CLI

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a compact stderr logger, honouring `RUST_LOG` when set
pub fn init(verbose: bool) {
    let default = if verbose {
        "yamlscript=debug,ys_load=debug"
    } else {
        "yamlscript=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
