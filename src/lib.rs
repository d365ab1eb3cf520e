//! focusboard core library
//!
//! Task store, completion and streak accounting, and the completion history
//! ledger, all over a single SQLite database.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod streak;
pub mod types;
