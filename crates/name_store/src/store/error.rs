use thiserror::Error;

/// Errors raised by the service plumbing of the store.
///
/// Name operations themselves never fail: removing an absent name, sorting or
/// clearing an empty list are all no-ops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store error, unexpected response from the name list")]
    UnexpectedResponse,

    #[error("Store error, name list dropped")]
    ListDropped,
}
