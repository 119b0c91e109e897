//! Log subscriber setup.

use std::io::{self, IsTerminal};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Installs a stderr log subscriber filtered by `RUST_LOG`.
///
/// Colors are enabled only when stderr is a terminal, so redirected logs
/// stay free of escape codes.
///
/// ```bash
/// RUST_LOG=debug artsweep list
/// RUST_LOG=artsweep_github=trace artsweep sweep --days 7 2> sweep.log
/// ```
pub(super) fn init_tracing() -> anyhow::Result<()> {
    let filter = log_filter()?;
    let ansi = colors_enabled(&io::stderr());

    let layer = fmt::layer()
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    Ok(())
}

/// Returns `true` if log lines written to `stream` should carry colors.
fn colors_enabled(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

fn log_filter() -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(DEFAULT_FILTER)?),
    }
}
