//! tokcount CLI library
//!
//! This library provides the command-line interface for counting token
//! frequencies and converting text into vocabulary identifier sequences.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
