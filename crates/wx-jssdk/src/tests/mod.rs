mod recording;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

/// Lets spawned tasks run until they block. Needs a paused clock.
pub(crate) async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// Routes logs to the test harness. Filtered by `RUST_LOG`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
