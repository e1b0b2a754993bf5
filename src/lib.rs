//! Little Garden calendar journal library
//!
//! This library provides the month grid, the per-day note ("flower") store and
//! its persistence for a single-user calendar journal.

mod aggregate;
mod calendar;
mod cli;
mod config;
mod date_key;
mod errors;
mod helper;
mod note;
mod session;
mod storage;
mod store;
mod types;

// Re-export key components
pub use aggregate::*;
pub use calendar::*;
pub use cli::*;
pub use config::*;
pub use date_key::*;
pub use errors::*;
pub use helper::*;
pub use note::*;
pub use session::*;
pub use storage::*;
pub use store::*;
pub use types::*;
