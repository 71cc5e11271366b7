//! Configuration module for docshelf
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. When no file is given the built-in defaults are used, so the
//! binary runs with no required arguments.
//!
//! # Example
//!
//! ```no_run
//! use docshelf::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("docshelf.toml")).unwrap();
//! println!("Store root: {}", config.store.root_dir);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, SourceConfig, StoreConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, default_config, load_config, load_config_with_hash};
