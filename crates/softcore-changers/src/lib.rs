//! SoftcoreRedux changers
//!
//! The concrete mutation units behind every SoftcoreRedux option, grouped into
//! sections and planned by [`SoftcorePlanner`].
//!
//! # Core Concepts
//!
//! - [`changers`]: one module per configuration section; each exposes
//!   `section` builders that capture the options their units need
//! - [`ids`]: host template, trader and quest ids the units edit
//! - [`SoftcorePlanner`]: the fixed section order handed to the orchestrator
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use softcore_changers::{ids::items, SoftcorePlanner};
//! use softcore_config::Configuration;
//! use softcore_dataset::{ptr, Dataset, TableId};
//! use softcore_engine::{PatchOrchestrator, Reporter};
//!
//! let mut config = Configuration::default();
//! config.stash_options.enabled = true;
//! config.stash_options.bigger_stash = true;
//!
//! let mut dataset = Dataset::new().with_table(
//!     TableId::Items,
//!     json!({(items::STASH_STANDARD): {"_props": {"Grids": [{"_props": {"cellsH": 10, "cellsV": 30}}]}}}),
//! );
//!
//! let mut orchestrator = PatchOrchestrator::new(config, &SoftcorePlanner, Reporter::default());
//! orchestrator.run(&mut dataset).unwrap();
//!
//! let rows = ptr!(items::STASH_STANDARD, "_props", "Grids", 0, "_props", "cellsV");
//! assert_eq!(dataset.get(TableId::Items, &rows), Some(&json!(50)));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod assets;
pub mod changers;
pub mod ids;
mod planner;
mod tables;

pub use planner::SoftcorePlanner;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
