use tracing_subscriber::{EnvFilter, fmt};

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Class builds, re-typing and failed validation log at `debug`; change
/// notifications log at `trace`. Calling this again after a subscriber is
/// installed does nothing.
///
/// ```ignore
/// fieldkit::tracing::setup_tracing();
/// ```
pub fn setup_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
