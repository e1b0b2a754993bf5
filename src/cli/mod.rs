//! CLI module for the garden application
mod app;
mod args;

pub use app::*;
pub use args::*;
