//! Logging of guardian filter passes.

use name_store::PurgeReport;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

/// Log every guardian pass until the guardian goes away.
///
/// Passes missed because the receiver fell behind are reported and skipped.
/// Returns the number of passes logged.
pub async fn log_reports(mut reports: broadcast::Receiver<PurgeReport>) -> usize {
    let mut logged = 0;
    loop {
        match reports.recv().await {
            Ok(report) => {
                info!(removed = ?report.removed, "guardian pass");
                logged += 1;
            }
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "guardian reports lagged behind");
            }
            Err(RecvError::Closed) => return logged,
        }
    }
}
