//! Opt-in tracing setup for hosts that do not install their own subscriber.
//!
//! Library code only emits `tracing` events; nothing here runs unless the
//! host calls it.

/// Filter used when `RUST_LOG` is unset: crate debug output, everything
/// else at `warn`.
pub const DEFAULT_FILTER: &str = "warn,bar_view=debug";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`.
///
/// Returns `false` without the `telemetry` feature, for an unparsable
/// fallback filter, or when a global subscriber is already set.
#[must_use]
pub fn init_tracing(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match EnvFilter::try_new(default_filter) {
                Ok(filter) => filter,
                Err(_) => return false,
            },
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}

/// `init_tracing` with `DEFAULT_FILTER`.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}
