//! Telemetry helpers for hosts embedding `overlay-rs`.
//!
//! Overlays log redraw summaries, skipped records and style conflicts through
//! `tracing`. Installing a subscriber stays the host's choice; the helpers
//! below are a convenience for tools and tests.

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "overlay_rs=info";

/// Initializes a compact `tracing` subscriber honoring `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with an explicit fallback filter directive,
/// e.g. `"overlay_rs=trace"` to see every skipped record.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
