//! Logging bootstrap shared by every integration test binary.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-friendly subscriber once per process.
///
/// The filter comes from `TEST_LOG`, then `RUST_LOG`, and is otherwise quiet
/// (`warn`, with sqlx statement logging silenced). Output goes through the
/// test writer so `cargo test` captures it per test.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn,sqlx=error"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init();
    });
}
