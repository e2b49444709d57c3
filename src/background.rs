use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};
use crate::state::AppState;

const SWEEP_INTERVAL_SECS: u64 = 60;

/// Cancels payment holds whose window has lapsed and returns their
/// inventory. Expiry itself is enforced by comparison everywhere holds are
/// read, so the sweep only affects bookkeeping, not correctness.
pub async fn start_expiry_reaper(state: Arc<AppState>) {
    info!("Starting expired-hold reaper...");

    loop {
        match state.bookings.cancel_expired().await {
            Ok(0) => {}
            Ok(count) => info!("Reaper cancelled {} expired hold(s)", count),
            Err(e) => error!("Expired-hold sweep failed: {:?}", e),
        }
        sleep(Duration::from_secs(SWEEP_INTERVAL_SECS)).await;
    }
}
