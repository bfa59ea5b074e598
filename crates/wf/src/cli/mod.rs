//! CLI support for the `wf` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod logger;
pub mod output;

pub use context::CommandContext;
