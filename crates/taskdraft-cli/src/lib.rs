//! The TaskDraft command-line application.
//!
//! Everything interactive lives here: the [`Console`] abstraction over
//! prompt I/O, application [`config`], the first-run and resume [`setup`]
//! flow, role-specific system [`prompts`], and the command dispatcher
//! [`repl`]. The binary in `main.rs` only wires these together.
//!
//! [`Console`]: console::Console

pub mod config;
pub mod console;
pub mod prompts;
pub mod repl;
pub mod setup;

pub use console::{Console, StdioConsole};
pub use repl::Repl;
