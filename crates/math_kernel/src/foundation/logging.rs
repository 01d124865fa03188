//! Logging setup for binaries and tests
//!
//! The kernel only emits through the `log` facade: plane extraction at
//! debug, culling rejections at trace, unsupported shapes at error.

pub use log::{debug, error, info, trace, warn, LevelFilter};

/// Initialize logging with a default level that `RUST_LOG` can override
pub fn init_with_level(default: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .init();
}

/// Initialize logging for tests, ignoring repeated initialization
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
