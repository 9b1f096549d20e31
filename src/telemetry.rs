//! Tracing setup for the command-line renderer.
//!
//! The library only emits `tracing` events; hosts embedding it wire their
//! own subscriber.

/// Installs a compact stderr subscriber filtered by `RUST_LOG` (default
/// `warn`). Returns `false` when the `cli` feature is off or a global
/// subscriber already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "cli")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "cli"))]
    {
        false
    }
}
