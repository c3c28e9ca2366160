//! Section applier
//!
//! A section groups the units behind one configuration toggle. Each unit
//! runs inside its own fault boundary: an `Err` or a panic becomes a
//! `failed` outcome, the unit's tables are restored from a snapshot, and the
//! next unit runs. A unit that soft-skipped on missing data and left its
//! tables as they were is `skipped`.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use softcore_dataset::Dataset;

use crate::error::UnitError;
use crate::outcome::{Outcome, Tally};
use crate::reporter::Reporter;
use crate::unit::{MutationUnit, UnitContext};

/// A unit together with its own sub-option flag
pub struct GatedUnit {
    enabled: bool,
    unit: Box<dyn MutationUnit>,
}

impl GatedUnit {
    /// Whether the unit's sub-option is on
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The unit
    #[inline]
    #[must_use]
    pub fn unit(&self) -> &dyn MutationUnit {
        self.unit.as_ref()
    }
}

/// Configuration-gated group of units
pub struct Section {
    name: String,
    enabled: bool,
    marketplace: bool,
    units: Vec<GatedUnit>,
}

impl std::fmt::Debug for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("marketplace", &self.marketplace)
            .field("units", &self.unit_names())
            .finish()
    }
}

impl Section {
    /// Create an empty section
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
            marketplace: false,
            units: Vec::new(),
        }
    }

    /// Mark the section as depending on the flea market
    #[must_use]
    pub fn marketplace(mut self) -> Self {
        self.marketplace = true;
        self
    }

    /// Attach a unit behind its sub-option flag
    #[must_use]
    pub fn unit(mut self, enabled: bool, unit: impl MutationUnit + 'static) -> Self {
        self.units.push(GatedUnit {
            enabled,
            unit: Box::new(unit),
        });
        self
    }

    /// Section name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the section toggle is on
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the section depends on the flea market
    #[inline]
    #[must_use]
    pub fn is_marketplace(&self) -> bool {
        self.marketplace
    }

    /// Attached units, in run order
    #[inline]
    #[must_use]
    pub fn units(&self) -> &[GatedUnit] {
        &self.units
    }

    /// Names of the attached units
    #[must_use]
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|g| g.unit.name()).collect()
    }

    /// Report every unit as skipped without touching the dataset
    pub fn skip_all(&self, reporter: &Reporter, reason: &str) -> Tally {
        let mut tally = Tally::default();
        for gated in &self.units {
            let outcome = Outcome::skipped(&self.name, gated.unit.name(), reason);
            tally.count(outcome.status);
            reporter.record(&outcome);
        }
        tally
    }

    /// Apply the section to the dataset
    pub fn apply(&self, dataset: &mut Dataset, reporter: &Reporter) -> Tally {
        if !self.enabled {
            reporter.debug(format!("{} disabled", self.name));
            return self.skip_all(reporter, "section disabled");
        }

        let mut tally = Tally::default();
        for gated in &self.units {
            let outcome = if gated.enabled {
                self.run_unit(gated.unit.as_ref(), dataset, reporter)
            } else {
                Outcome::skipped(&self.name, gated.unit.name(), "option disabled")
            };
            tally.count(outcome.status);
            reporter.record(&outcome);
        }
        tally
    }

    fn run_unit(&self, unit: &dyn MutationUnit, dataset: &mut Dataset, reporter: &Reporter) -> Outcome {
        let name = unit.name();
        let scope = unit.scope();
        let snapshot = dataset.snapshot(scope);

        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut ctx = UnitContext::new(dataset, scope, &self.name, name, reporter);
            let result = unit.apply(&mut ctx);
            (result, ctx.skip_reason().map(str::to_string))
        }));

        let error = match result {
            Ok((Ok(()), Some(reason))) if snapshot.unchanged_in(dataset) => {
                return Outcome::skipped(&self.name, name, reason);
            }
            Ok((Ok(()), _)) => return Outcome::applied(&self.name, name),
            Ok((Err(err), _)) => err,
            Err(payload) => UnitError::Panicked(panic_message(payload.as_ref())),
        };

        dataset.restore(snapshot);
        Outcome::failed(&self.name, name, error.to_string())
    }
}

/// Text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
