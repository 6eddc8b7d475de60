// ABOUTME: Shared logging setup for the hostkey binaries
// ABOUTME: Stderr output, WARN for dependencies, workspace crates scaled by verbosity

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Crates whose level follows the `-v` count.
const WORKSPACE_CRATES: &[&str] = &["hostkey_core", "hostkey_cli"];

/// Level for this workspace's crates at a given `-v` count.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build the filter: WARN for everything, the workspace crates at
/// `level_for(verbosity)`, then any `RUST_LOG` directives on top.
pub fn filter_for(verbosity: u8) -> EnvFilter {
    let level = level_for(verbosity);
    let mut filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();

    for name in WORKSPACE_CRATES {
        let directive = format!("{name}={level}")
            .parse::<Directive>()
            .unwrap_or_else(|_| level.into());
        filter = filter.add_directive(directive);
    }

    if let Ok(overrides) = std::env::var(EnvFilter::DEFAULT_ENV) {
        for directive in overrides.split(',').filter_map(|d| d.parse().ok()) {
            filter = filter.add_directive(directive);
        }
    }

    filter
}

/// Logging to stderr so converted output on stdout stays clean.
/// Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
