//! Softcore Configuration
//!
//! Schema, defaults and loader for the user-facing configuration file.
//!
//! # Core Concepts
//!
//! - [`Configuration`]: the tree of sections, each with an `enabled` flag
//!   and typed options; fully populated from per-section defaults
//! - [`ConfigServer`]: reads `<mod root>/config/config.json5` once,
//!   all-or-nothing
//! - [`ConfigError`]: `CONFIG_LOAD_ERROR` and `CONFIG_NOT_LOADED`
//!
//! The file is JSON5: comments, trailing commas and unquoted keys are fine.
//! Unknown keys are ignored.
//!
//! # Example
//!
//! ```rust
//! use softcore_config::Configuration;
//!
//! let config = Configuration::parse(
//!     r"{
//!         // bigger stash only
//!         stashOptions: { enabled: true, biggerStash: true },
//!     }",
//! )
//! .unwrap();
//!
//! assert!(config.stash_options().bigger_stash);
//! assert!(!config.hideout_options().enabled);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![allow(clippy::struct_excessive_bools)]

mod error;
pub mod model;
mod server;
mod validate;

pub use error::{ConfigError, LoadFailure};
pub use model::Configuration;
pub use server::{ConfigServer, CONFIG_DIR, CONFIG_FILE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
