//! Name store module.
//!
//! ## Services
//!
//! - **List**: owns the ordered sequence of names, applies mutations by
//!   publishing a new snapshot and notifies subscribers of value changes
//! - **View**: read-only projection of a list, sorted reads and paced clear
//!
//! ## Default Service Stacks
//!
//! `NameViewDefaultStack` is the view built directly on the in-memory list.
//!
//! ## Initialization Helpers
//!
//! - `init_store()`: build a list and a view depending on it
//! - `init_store_with_guardian()`: same, with a guardian watching the list
pub mod api;
pub mod error;
pub mod list;
pub mod view;

use crate::{config::StoreConfig, guardian::NameGuardian};

/// View service stack over the in-memory name list.
pub type NameViewDefaultStack = view::NameViewService<list::NameListService>;

/// Initialize a name list and the view depending on it.
///
/// The view shares the list, so mutations made through the returned list are
/// visible to the view right away.
pub fn init_store(config: &StoreConfig) -> (list::NameListService, NameViewDefaultStack) {
    let list = list::NameListService::new();
    let view = view::NameViewService::new(list.clone(), config.clear_interval);
    (list, view)
}

/// Initialize a name list, its view, and a guardian watching the list.
///
/// Must be called from within a tokio runtime. The guardian runs as a spawned
/// task for as long as the returned handle is kept alive and the list exists:
/// it only holds a weak handle, so dropping every list and view handle ends
/// it.
pub async fn init_store_with_guardian(
    config: &StoreConfig,
) -> Result<(list::NameListService, NameViewDefaultStack, NameGuardian), error::StoreError> {
    let (list, view) = init_store(config);
    let guardian = NameGuardian::install(list.downgrade(), config).await?;
    Ok((list, view, guardian))
}
