//! Guardian removing bad names once the list has settled.
//!
//! The guardian subscribes to a name list and debounces its changes: every
//! observed change cancels the pending timer, captures the current names and
//! arms a new timer. When a timer expires without further change, every
//! captured name containing the bad pattern is removed from the list.
//!
//! Removals made by the guardian are changes like any other, so a pass that
//! removed something re-arms the timer and is followed by a second, empty
//! pass.
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tower::{Service, ServiceExt};
use tracing::{debug, info, warn};

use crate::{
    config::StoreConfig,
    store::{
        api::{NameListRequest, NameListResponse, Names},
        error::StoreError,
    },
};

const REPORTS_CAPACITY: usize = 16;

/// Outcome of a completed filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeReport {
    /// Bad names found in the captured snapshot, in list order
    pub removed: Vec<String>,
}

/// Handle on a running guardian task.
///
/// Dropping the handle stops the guardian, a pending timer is discarded.
#[derive(Debug)]
pub struct NameGuardian {
    task: JoinHandle<()>,
    reports: broadcast::Sender<PurgeReport>,
}

impl NameGuardian {
    /// Subscribe to `list` and spawn the guardian task.
    ///
    /// Changes made after this returns are observed; the names already in the
    /// list are left alone until the next change. The task ends by itself once
    /// the list is dropped, which only happens if `list` does not own it (see
    /// [`NameListService::downgrade`](crate::store::list::NameListService::downgrade)).
    pub async fn install<L>(mut list: L, config: &StoreConfig) -> Result<Self, StoreError>
    where
        L: Service<NameListRequest, Response = NameListResponse, Error = StoreError>
            + Send
            + 'static,
        L::Future: Send,
    {
        let changes = match list.ready().await?.call(NameListRequest::Subscribe).await? {
            NameListResponse::Subscription(changes) => changes,
            _ => return Err(StoreError::UnexpectedResponse),
        };
        let (reports, _) = broadcast::channel(REPORTS_CAPACITY);
        info!(
            "[guardian] installed, debounce: {:?}, bad pattern: {:?}",
            config.debounce, config.bad_pattern
        );
        let task = tokio::spawn(watch_names(list, changes, config.clone(), reports.clone()));
        Ok(Self { task, reports })
    }

    /// Feed of completed filter passes.
    pub fn reports(&self) -> broadcast::Receiver<PurgeReport> {
        self.reports.subscribe()
    }

    /// Whether the guardian task is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the guardian.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for NameGuardian {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn watch_names<L>(
    mut list: L,
    mut changes: watch::Receiver<Names>,
    config: StoreConfig,
    reports: broadcast::Sender<PurgeReport>,
) where
    L: Service<NameListRequest, Response = NameListResponse, Error = StoreError>,
{
    // Idle: no pending timer
    while changes.changed().await.is_ok() {
        let mut captured = changes.borrow_and_update().clone();
        debug!("[guardian] armed for {:?}", config.debounce);

        // Armed: a fresh sleep per iteration, so a change cancels the pending one
        loop {
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        debug!("[guardian] name list dropped, pending pass discarded");
                        return;
                    }
                    captured = changes.borrow_and_update().clone();
                    debug!("[guardian] re-armed for {:?}", config.debounce);
                }
                _ = tokio::time::sleep(config.debounce) => break,
            }
        }

        match purge(&mut list, &captured, &config).await {
            Ok(report) => {
                info!("[guardian] filter pass removed {:?}", report.removed);
                // Nobody listening is fine
                let _ = reports.send(report);
            }
            Err(err) => warn!("[guardian] filter pass failed: {}", err),
        }
    }
    debug!("[guardian] name list dropped, stopping");
}

async fn purge<L>(
    list: &mut L,
    captured: &Names,
    config: &StoreConfig,
) -> Result<PurgeReport, StoreError>
where
    L: Service<NameListRequest, Response = NameListResponse, Error = StoreError>,
{
    let removed: Vec<String> = captured.iter().filter(|name| config.is_bad(name)).cloned().collect();
    for name in &removed {
        list.ready().await?.call(NameListRequest::RemoveName(name.clone())).await?;
    }
    Ok(PurgeReport { removed })
}
