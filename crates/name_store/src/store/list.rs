//! Name list service owning the canonical sequence of names.
use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Weak},
    task::Poll,
};

use tokio::sync::watch;
use tower::Service;
use tracing::{debug, info};

use crate::store::{
    api::{NameListRequest, NameListResponse, Names},
    error::StoreError,
};

/// Ordered, duplicate-tolerant list of names.
///
/// The names live in a watch channel: every mutation publishes a fresh
/// snapshot, which is how subscribers observe changes. Clones share the same
/// list.
#[derive(Debug, Clone)]
pub struct NameListService {
    names: Arc<watch::Sender<Names>>,
}

impl Default for NameListService {
    fn default() -> Self {
        let (names, _) = watch::channel(Names::from(Vec::new()));
        Self { names: Arc::new(names) }
    }
}

impl NameListService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name`, always notifying subscribers.
    pub fn add_name(&self, name: String) {
        self.names.send_modify(|names| {
            *names = names.iter().cloned().chain(std::iter::once(name)).collect();
        });
    }

    /// Removes every occurrence of `name`.
    ///
    /// Subscribers are only notified if something was removed.
    pub fn remove_name(&self, name: &str) {
        self.names.send_if_modified(|names| {
            if !names.iter().any(|n| n == name) {
                return false;
            }
            *names = names.iter().filter(|n| *n != name).cloned().collect();
            true
        });
    }

    /// Snapshot of the current names, in insertion order.
    pub fn names(&self) -> Names {
        self.names.borrow().clone()
    }

    /// Registers a new change observer.
    ///
    /// The current snapshot is marked as seen, so the receiver only wakes for
    /// later changes.
    pub fn subscribe(&self) -> watch::Receiver<Names> {
        self.names.subscribe()
    }

    /// Handle on this list that does not keep it alive.
    pub fn downgrade(&self) -> WeakNameListService {
        WeakNameListService { names: Arc::downgrade(&self.names) }
    }

    fn dispatch(&self, request: NameListRequest) -> NameListResponse {
        match request {
            NameListRequest::AddName(name) => {
                info!("[list] AddName: {:?}", name);
                self.add_name(name);
                NameListResponse::Ack
            }
            NameListRequest::RemoveName(name) => {
                info!("[list] RemoveName: {:?}", name);
                self.remove_name(&name);
                NameListResponse::Ack
            }
            NameListRequest::GetNames => {
                debug!("[list] GetNames");
                NameListResponse::Names(self.names())
            }
            NameListRequest::Subscribe => {
                debug!("[list] Subscribe");
                NameListResponse::Subscription(self.subscribe())
            }
        }
    }
}

/// Non-owning handle on a [`NameListService`].
///
/// Speaks the same API, but once every owning handle is gone the list is
/// dropped, subscriptions close and requests fail with
/// [`StoreError::ListDropped`]. Observers hold this so they do not outlive
/// the store they watch.
#[derive(Debug, Clone)]
pub struct WeakNameListService {
    names: Weak<watch::Sender<Names>>,
}

impl WeakNameListService {
    /// Owning handle, if the list is still alive.
    pub fn upgrade(&self) -> Option<NameListService> {
        self.names.upgrade().map(|names| NameListService { names })
    }
}

impl Service<NameListRequest> for NameListService {
    type Response = NameListResponse;
    type Error = StoreError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: NameListRequest) -> Self::Future {
        let this = self.clone();
        Box::pin(async move { Ok(this.dispatch(request)) })
    }
}

impl Service<NameListRequest> for WeakNameListService {
    type Response = NameListResponse;
    type Error = StoreError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: NameListRequest) -> Self::Future {
        let this = self.upgrade();
        Box::pin(async move {
            match this {
                Some(list) => Ok(list.dispatch(request)),
                None => Err(StoreError::ListDropped),
            }
        })
    }
}
