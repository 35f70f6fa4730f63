//! Name store demos - shared utilities
//!
//! Logging setup, guardian report logging and session scripting used by the
//! demo binaries.

pub mod logging;
pub mod reports;
pub mod session;
