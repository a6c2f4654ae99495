//! Test logging for every integration test binary.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Used when neither `TEST_LOG` nor `RUST_LOG` is set. The scheduler logs
/// every tick, which drowns out failures in short-round tests.
const QUIET: &str = "warn,crowd_chess::services::scheduler=error";

static SUBSCRIBER: OnceCell<()> = OnceCell::new();

fn filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(QUIET))
}

/// Install a test-writer subscriber once per process; later calls do nothing.
pub fn init() {
    SUBSCRIBER.get_or_init(|| {
        // try_init: a unit-test ctor in the same binary may have won the race
        let _ = fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
