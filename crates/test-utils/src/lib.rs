pub mod builders;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run `f` on `threads` OS threads at once (released together by a barrier)
/// inside a multi-threaded tokio runtime, returning every result.
pub fn run_concurrently<F, T>(threads: usize, f: F) -> Vec<T>
where
    F: Fn() -> T + Send + Sync + 'static,
    T: Send + 'static,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .max_blocking_threads(threads.max(1))
        .enable_all()
        .build()
        .expect("failed to build tokio runtime");

    runtime.block_on(async move {
        let f = std::sync::Arc::new(f);
        let barrier = std::sync::Arc::new(std::sync::Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let f = std::sync::Arc::clone(&f);
                let barrier = std::sync::Arc::clone(&barrier);
                tokio::task::spawn_blocking(move || {
                    barrier.wait();
                    f()
                })
            })
            .collect();

        let mut results = Vec::with_capacity(threads);
        for handle in handles {
            results.push(handle.await.expect("concurrent task panicked"));
        }
        results
    })
}
