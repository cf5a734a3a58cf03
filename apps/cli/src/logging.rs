//! Logging initialization for the `umlgen` binary

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "umlgen=info,umlgen_codegen=info,umlgen_xmi=info";
const VERBOSE_FILTER: &str = "umlgen=debug,umlgen_codegen=debug,umlgen_xmi=debug";

/// Install a stderr fmt subscriber. `RUST_LOG` wins over the built-in
/// defaults; `verbose` only changes the default.
pub fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into())
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}
