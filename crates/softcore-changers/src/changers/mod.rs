//! One module per configuration section
//!
//! Each module exposes `section` builders taking the [`Configuration`] and
//! returning a [`Section`] whose units capture the options they need.
//!
//! [`Configuration`]: softcore_config::Configuration
//! [`Section`]: softcore_engine::Section

use serde_json::Value;
use softcore_dataset::TableId;
use softcore_engine::{MutationUnit, UnitContext, UnitError};

use crate::tables;

pub mod crafting;
pub mod hideout;
pub mod insurance;
pub mod market;
pub mod scav_case;
pub mod secure_containers;
pub mod stash;
pub mod traders;
pub mod tweaks;

/// Writes one fixed value
struct SetEntry {
    name: &'static str,
    table: TableId,
    pointer: &'static str,
    value: Value,
}

impl SetEntry {
    fn new(name: &'static str, table: TableId, pointer: &'static str, value: impl Into<Value>) -> Self {
        Self {
            name,
            table,
            pointer,
            value: value.into(),
        }
    }
}

impl MutationUnit for SetEntry {
    fn name(&self) -> &str {
        self.name
    }

    fn scope(&self) -> &[TableId] {
        std::slice::from_ref(&self.table)
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        tables::assign(ctx, self.table, self.pointer, self.value.clone())?;
        Ok(())
    }
}
