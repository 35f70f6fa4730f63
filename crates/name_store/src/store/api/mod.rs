//! Request and response types of the store services.
//!
//! - **NameList**: mutations, snapshot reads and change subscriptions of the
//!   canonical sequence of names
//! - **NameView**: derived reads and paced bulk removal built on top of a
//!   NameList service

pub mod types;

pub use types::*;
