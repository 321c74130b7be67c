//! leafconf CLI - Command-line interface library
//!
//! This library provides the CLI functionality for leafconf:
//! - Check: Validate Leaf configuration files
//! - Outline: Print the section and declaration tree of a file
//!
//! # Library Usage
//!
//! ```ignore
//! use leafconf_cli::{check_files, render_report, OutputFormat};
//!
//! let files = check_files(&["conf/*.conf".to_string()], &Settings::default())?;
//! println!("{}", render_report(&files, OutputFormat::Json)?);
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Check configuration files for issues
//! leafconf check config.conf 'conf.d/*.conf' --format json
//!
//! # Show the structure of a file
//! leafconf outline config.conf
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{check_command, check_files, outline_command, outline_text, render_report};
pub use app::{run_cli, CheckedFile, OutputFormat};
