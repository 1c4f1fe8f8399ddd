//! Library components of the `electoral` command-line tool.

pub mod commands;
pub mod logging;
pub mod settings;
