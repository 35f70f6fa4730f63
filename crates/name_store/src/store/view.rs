//! Name view service, a read-only projection of a name list.
use std::{future::Future, pin::Pin, task::Poll, time::Duration};

use tower::{Service, ServiceExt};
use tracing::{debug, info};

use crate::store::{
    api::{NameListRequest, NameListResponse, NameViewRequest, NameViewResponse, Names},
    error::StoreError,
};

/// View over a name list.
///
/// The view stores no names of its own: every read goes through the list
/// service it was built with.
#[derive(Debug, Clone)]
pub struct NameViewService<L> {
    /// Service owning the names
    list: L,
    /// Pause before each removal of a clear pass, except the first one
    clear_interval: Duration,
}

impl<L> NameViewService<L> {
    pub fn new(list: L, clear_interval: Duration) -> Self {
        Self { list, clear_interval }
    }
}

impl<L> NameViewService<L>
where
    L: Service<NameListRequest, Response = NameListResponse, Error = StoreError>,
{
    async fn names(&mut self) -> Result<Names, StoreError> {
        match self.list.ready().await?.call(NameListRequest::GetNames).await? {
            NameListResponse::Names(names) => Ok(names),
            _ => Err(StoreError::UnexpectedResponse),
        }
    }

    /// Current names sorted in ascending code point order.
    pub async fn sorted_names(&mut self) -> Result<Vec<String>, StoreError> {
        let mut sorted = self.names().await?.to_vec();
        sorted.sort();
        Ok(sorted)
    }

    /// Removes the names present at call time, last added first.
    ///
    /// Names added while the pass is running are left alone, and names
    /// already removed by someone else are silently skipped by the list.
    /// Returns the number of removals issued.
    pub async fn clear_all(&mut self) -> Result<usize, StoreError> {
        let snapshot = self.names().await?;
        for (step, name) in snapshot.iter().rev().enumerate() {
            if step > 0 {
                tokio::time::sleep(self.clear_interval).await;
            }
            debug!("[view] clear step {}: {:?}", step, name);
            self.list.ready().await?.call(NameListRequest::RemoveName(name.clone())).await?;
        }
        Ok(snapshot.len())
    }
}

impl<L> Service<NameViewRequest> for NameViewService<L>
where
    L: Service<NameListRequest, Response = NameListResponse, Error = StoreError>
        + Clone
        + Send
        + 'static,
    L::Future: Send,
{
    type Response = NameViewResponse;
    type Error = StoreError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: NameViewRequest) -> Self::Future {
        let mut this = self.clone();
        Box::pin(async move {
            match request {
                NameViewRequest::SortedNames => {
                    debug!("[view] SortedNames");
                    this.sorted_names().await.map(NameViewResponse::SortedNames)
                }
                NameViewRequest::ClearAll => {
                    info!("[view] ClearAll every {:?}", this.clear_interval);
                    let cleared = this.clear_all().await?;
                    info!("[view] ClearAll done, {} removals", cleared);
                    Ok(NameViewResponse::Cleared(cleared))
                }
            }
        })
    }
}
