//! Tracing bootstrap for hosts embedding the composer.
//!
//! Setup is opt-in behind the `telemetry` feature; hosts that install their
//! own global subscriber keep it and this module stays out of the way.

/// Filter applied when `RUST_LOG` is unset: layout and boundary spans from
/// this crate at debug, everything else at info.
#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "chart_compose=debug,info";

/// Installs a compact `tracing` subscriber honoring `RUST_LOG`.
///
/// Returns `false` if another subscriber is already registered.
#[cfg(feature = "telemetry")]
#[must_use]
pub fn init_default_tracing() -> bool {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

/// Without the `telemetry` feature this is a no-op that reports `false`.
#[cfg(not(feature = "telemetry"))]
#[must_use]
pub fn init_default_tracing() -> bool {
    false
}
