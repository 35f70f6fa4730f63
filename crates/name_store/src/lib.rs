//! An in-process store of names with a sorted view and two cleanup behaviours.
//!
//! The store is made of three cooperating components:
//!
//! - [`store::list::NameListService`] owns the ordered sequence of names and
//!   notifies subscribers whenever it changes.
//! - [`store::view::NameViewService`] derives a sorted snapshot of the list and
//!   can clear it one name at a time, pausing between removals.
//! - [`guardian::NameGuardian`] watches the list and, once it has been quiet
//!   for the debounce period, removes every name containing the bad pattern.
//!
//! Components talk to each other through [`tower::Service`] request/response
//! pairs defined in [`store::api`], so the view and the guardian can be built
//! on top of any service that speaks the list API.
//!
//! All timing relies on tokio timers and is meant to run on a current-thread
//! runtime: the only suspension points are the guardian debounce and the pause
//! between two removals of `clear_all`.

#[cfg(test)]
mod tests;

pub mod config;
pub mod guardian;
pub mod store;

pub use config::StoreConfig;
pub use guardian::{NameGuardian, PurgeReport};
pub use store::{
    NameViewDefaultStack,
    api::{NameListRequest, NameListResponse, NameViewRequest, NameViewResponse, Names},
    error::StoreError,
    init_store, init_store_with_guardian,
    list::{NameListService, WeakNameListService},
    view::NameViewService,
};

/// Test log output for the store services.
///
/// Filtered from `NAME_STORE_LOG` (same syntax as `RUST_LOG`), silent when
/// unset. Timestamps are relative to the first call, which with paused test
/// time keeps guardian and clear pacing readable.
#[cfg(feature = "store_tracing")]
pub mod store_tracing {
    use std::sync::Once;
    use tracing_subscriber::{EnvFilter, fmt};

    /// Environment variable holding the test log filter
    pub const LOG_ENV: &str = "NAME_STORE_LOG";

    static INIT: Once = Once::new();

    /// Install the test subscriber, later calls are no-ops.
    pub fn init() {
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
            fmt()
                .with_env_filter(filter)
                .with_timer(fmt::time::uptime())
                .with_target(false)
                .with_test_writer()
                .compact()
                .init();
        });
    }
}
