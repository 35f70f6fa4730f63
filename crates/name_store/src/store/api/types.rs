use std::sync::Arc;

use tokio::sync::watch;

/// Immutable snapshot of the names held by a list.
///
/// The list never mutates a snapshot in place: each mutation publishes a new
/// one, so a snapshot taken earlier keeps its contents.
pub type Names = Arc<[String]>;

/// NameList request types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameListRequest {
    /// Append a name at the end of the list.
    ///
    /// Empty names and duplicates are accepted.
    AddName(String),
    /// Remove every occurrence of a name.
    ///
    /// Matching is exact string equality. Removing an absent name leaves the
    /// list untouched.
    RemoveName(String),
    /// Get a snapshot of the current names, in insertion order.
    GetNames,
    /// Register for change notifications.
    ///
    /// The returned receiver is woken after every mutation that changed the
    /// list by value and always yields the latest snapshot.
    Subscribe,
}

/// NameList response types.
#[derive(Debug)]
pub enum NameListResponse {
    /// Mutation applied.
    Ack,
    /// Snapshot of the names.
    Names(Names),
    /// Change notification channel.
    Subscription(watch::Receiver<Names>),
}

/// NameView request types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameViewRequest {
    /// Get the current names sorted in ascending code point order.
    SortedNames,
    /// Remove every current name, last added first, pausing between removals.
    ClearAll,
}

/// NameView response types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameViewResponse {
    /// Sorted copy of the names.
    SortedNames(Vec<String>),
    /// Clear pass completed after the given number of removals.
    Cleared(usize),
}
