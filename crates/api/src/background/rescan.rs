//! Periodic storage re-scan.
//!
//! Re-runs the reconciler on a fixed interval so files copied into the
//! storage tree while the server is up appear without an admin re-scan.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use vfe_scanner::Reconciler;

/// Run the re-scan loop until `cancel` is triggered.
///
/// The first pass happens one `period` after start: startup has already
/// reconciled once. Failures are logged and the loop keeps going.
pub async fn run(reconciler: Arc<Reconciler>, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs(), "Periodic re-scan started");

    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Periodic re-scan stopping");
                break;
            }
            _ = interval.tick() => {
                match reconciler.run().await {
                    Ok(report) if report.changed() => {
                        tracing::info!(?report, "Periodic re-scan updated the catalog");
                    }
                    Ok(_) => tracing::debug!("Periodic re-scan: catalog already current"),
                    Err(e) => tracing::error!(error = %e, "Periodic re-scan failed"),
                }
            }
        }
    }
}
