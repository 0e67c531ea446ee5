//! Input handling module

pub mod glob_resolver;

pub use glob_resolver::{list_directory, resolve_input, resolve_patterns};
