use std::{future::Future, time::Duration};

use tracing::info;

use crate::fetcher::WeatherFetcher;

/// Run cycles until `shutdown` resolves, waiting `delay` after each one completes.
///
/// The first cycle starts immediately. A cycle in flight is always allowed to
/// finish, so cycles never overlap and shutdown is only observed between them.
pub async fn run_with_fixed_delay<F>(fetcher: &WeatherFetcher, delay: Duration, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    info!(
        location = fetcher.location(),
        delay_secs = delay.as_secs(),
        "weather polling started"
    );

    loop {
        // Failures are already logged by the cycle and never stop the loop.
        let _ = fetcher.run_cycle().await;

        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested, weather polling stopped");
                break;
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }
}
