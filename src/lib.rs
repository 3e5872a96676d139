//! Progress-log helpers for AI-assisted coding sessions.
//!
//! Two utilities share `PROJECT-PROGRESS-LOG.md`:
//!
//! - [`check`] prints a reminder when the latest entry is older than the
//!   threshold. Call [`check::run_best_effort`] at the top of any tool to get
//!   the reminder for free; it never fails.
//! - [`counter`] bumps the `Session Counter:` header and appends a
//!   placeholder entry every few sessions.

pub mod app;
pub mod check;
pub mod cli;
pub mod config;
pub mod consts;
pub mod counter;
pub mod document;
pub mod error;
pub mod git;
pub mod settings;
pub mod store;
pub mod utils;

pub use error::AppError;
