pub mod config;
pub mod flowkit_toml;
pub mod logger;

pub use config::*;
pub use flowkit_toml::{apply_file_to_opts, load_flowkit_toml, parse_flowkit_toml};
pub use logger::setup_logging;
