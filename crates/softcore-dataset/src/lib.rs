//! Softcore Dataset Handle
//!
//! The narrow interface through which the patch engine reads and writes the
//! host's in-memory reference database.
//!
//! # Core Concepts
//!
//! - [`Dataset`]: named tables of JSON records, owned by the host and lent to
//!   a patch run as `&mut`
//! - [`TableId`]: the key space of tables the engine knows about
//! - [`Snapshot`]: a copy of a set of tables, used to roll a failed unit back
//! - [`PriceLookup`]: handbook price queries
//! - [`ptr!`]: JSON pointer construction from record identifiers
//!
//! Entries are never deleted through this handle. Units replace or zero-out
//! values in place.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use softcore_dataset::{ptr, Dataset, TableId};
//!
//! let mut dataset = Dataset::new()
//!     .with_table(TableId::HideoutSettings, json!({"generatorFuelFlowRate": 0.5}));
//!
//! let pointer = ptr!("generatorFuelFlowRate");
//! let base = dataset.baseline(TableId::HideoutSettings, &pointer).unwrap();
//! dataset.set(TableId::HideoutSettings, &pointer, json!(base * 2.0)).unwrap();
//!
//! // A second application starts from the recorded baseline, not from 1.0.
//! let base = dataset.baseline(TableId::HideoutSettings, &pointer).unwrap();
//! assert_eq!(base, 0.5);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod dataset;
mod error;
pub mod pointer;
mod table;

pub use dataset::{Dataset, PriceLookup, Snapshot};
pub use error::DatasetError;
pub use table::TableId;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
