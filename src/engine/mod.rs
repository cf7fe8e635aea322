//! Engine for the `flowkit` binary: argument parsing, file operations, run handler.

pub mod arg_parser;
pub mod core;
pub mod handlers;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use core::{FileSum, Report, run_files};
pub use handlers::handle_run;
pub use tools::{file_sum_operation, sum_numbers};
