//! Opt-in log output
//!
//! Library code only emits `tracing` events. Binaries and tests that want to
//! see them install a subscriber here.

use tracing_subscriber::EnvFilter;

/// Install a formatted subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (e.g. `"plotstat=debug"`)
///
/// Returns false if a global subscriber was already set.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Route debug logs of every plotstat crate to the captured test output
pub fn init_for_tests() {
    use std::sync::Once;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                "plotstat_records=debug,plotstat_stats=debug,plotstat_scale=debug,plotstat_charts=debug",
            )
        });

        // Another test harness may already own the global subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_existing_subscriber() {
        init_for_tests();
        init_for_tests();
        assert!(!init("plotstat_charts=debug"));
    }
}
