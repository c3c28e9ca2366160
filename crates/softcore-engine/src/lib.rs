//! Softcore Patch Engine
//!
//! Applies a validated configuration to the host's dataset as a sequence of
//! independent, individually fault-isolated mutations.
//!
//! # Core Concepts
//!
//! - [`MutationUnit`]: one named, idempotent edit with a declared write scope
//! - [`UnitContext`]: what a unit sees: unrestricted reads, scope-checked
//!   writes, baselines and the soft-failure helpers
//! - [`Section`]: units behind one configuration toggle, each in its own
//!   fault boundary
//! - [`PatchOrchestrator`]: ordered sections, the marketplace precedence rule
//!   and the run state machine
//! - [`Reporter`]: prefixed, debug-gated diagnostics over a [`LogSink`]
//!
//! # Failure model
//!
//! | Failure                  | Caught at    | Reported as | Effect                         |
//! |--------------------------|--------------|-------------|--------------------------------|
//! | missing table or entry   | the unit     | warning     | unit applies nothing           |
//! | unit `Err` or panic      | section      | warning     | unit's tables restored         |
//! | panic outside any unit   | orchestrator | error       | remaining sections still run   |
//! | config missing / invalid | load         | `Err`       | no unit runs                   |
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use softcore_config::Configuration;
//! use softcore_dataset::{Dataset, TableId};
//! use softcore_engine::{FnUnit, PatchOrchestrator, Reporter, Section, UnitContext};
//!
//! let planner = |config: &Configuration| {
//!     let hideout = &config.hideout_options;
//!     vec![Section::new("hideout", hideout.enabled).unit(
//!         hideout.fuel_consumption.enabled,
//!         FnUnit::new("fuelConsumption", &[TableId::HideoutSettings], |ctx: &mut UnitContext<'_>| {
//!             ctx.scale(TableId::HideoutSettings, "/generatorFuelFlowRate", 0.5)?;
//!             Ok(())
//!         }),
//!     )]
//! };
//!
//! let mut config = Configuration::default();
//! config.hideout_options.enabled = true;
//! config.hideout_options.fuel_consumption.enabled = true;
//!
//! let mut dataset = Dataset::new()
//!     .with_table(TableId::HideoutSettings, json!({"generatorFuelFlowRate": 0.8}));
//!
//! let mut orchestrator = PatchOrchestrator::new(config, &planner, Reporter::default());
//! let summary = orchestrator.run(&mut dataset).unwrap();
//!
//! assert_eq!(summary.tally.applied, 1);
//! assert_eq!(dataset.get(TableId::HideoutSettings, "/generatorFuelFlowRate"), Some(&json!(0.4)));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod reporter;
pub mod section;
pub mod state;
pub mod unit;

pub use error::{RunError, SinkError, UnitError};
pub use orchestrator::{PatchOrchestrator, SectionPlanner};
pub use outcome::{Outcome, RunSummary, Status, Tally};
pub use reporter::{Level, LogEntry, LogSink, MemorySink, Reporter, TracingSink, DEFAULT_PREFIX};
pub use section::{GatedUnit, Section};
pub use state::{allowed_transitions, validate_transition, RunState};
pub use unit::{number, FnUnit, MutationUnit, UnitContext};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
