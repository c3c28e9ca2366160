//! Mutation units and the context they run in

use std::cell::OnceCell;

use serde_json::Value;
use softcore_dataset::{Dataset, PriceLookup, TableId};

use crate::error::UnitError;
use crate::reporter::Reporter;

/// A single named edit of the dataset.
///
/// Units capture their configuration options when they are planned and get
/// the dataset only through a [`UnitContext`]. They may read any table but
/// write only the tables listed in [`scope`](MutationUnit::scope).
///
/// A unit must be idempotent: numeric edits start from
/// [`UnitContext::baseline`], list edits are set unions.
pub trait MutationUnit {
    /// Name used in outcomes and log lines
    fn name(&self) -> &str;

    /// Tables the unit may write
    fn scope(&self) -> &[TableId];

    /// Apply the edit
    ///
    /// # Errors
    /// Any error makes the unit `failed`; the applier restores its tables.
    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError>;
}

/// Adapts a closure into a [`MutationUnit`]
pub struct FnUnit<F> {
    name: String,
    scope: Vec<TableId>,
    apply: F,
}

impl<F> FnUnit<F>
where
    F: Fn(&mut UnitContext<'_>) -> Result<(), UnitError>,
{
    /// Create unit
    pub fn new(name: impl Into<String>, scope: &[TableId], apply: F) -> Self {
        Self {
            name: name.into(),
            scope: scope.to_vec(),
            apply,
        }
    }
}

impl<F> MutationUnit for FnUnit<F>
where
    F: Fn(&mut UnitContext<'_>) -> Result<(), UnitError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> &[TableId] {
        &self.scope
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        (self.apply)(ctx)
    }
}

/// Capabilities handed to a running unit.
///
/// Reads go straight to the dataset. Writes are checked against the unit's
/// scope. Missing data turns into a warning and a soft skip through
/// [`skip`](UnitContext::skip); the `require*` helpers do this for the unit.
pub struct UnitContext<'a> {
    dataset: &'a mut Dataset,
    scope: &'a [TableId],
    section: &'a str,
    unit: &'a str,
    reporter: &'a Reporter,
    skipped: OnceCell<String>,
}

impl<'a> UnitContext<'a> {
    /// Create context
    pub fn new(
        dataset: &'a mut Dataset,
        scope: &'a [TableId],
        section: &'a str,
        unit: &'a str,
        reporter: &'a Reporter,
    ) -> Self {
        Self {
            dataset,
            scope,
            section,
            unit,
            reporter,
            skipped: OnceCell::new(),
        }
    }

    /// Read-only view of the whole dataset
    #[inline]
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        self.dataset
    }

    /// Read an entry
    #[inline]
    #[must_use]
    pub fn get(&self, table: TableId, pointer: &str) -> Option<&Value> {
        self.dataset.get(table, pointer)
    }

    /// Read a numeric entry
    #[must_use]
    pub fn number(&self, table: TableId, pointer: &str) -> Option<f64> {
        self.get(table, pointer).and_then(Value::as_f64)
    }

    /// Handbook price of a template
    #[must_use]
    pub fn handbook_price(&self, template_id: &str) -> Option<f64> {
        self.dataset.handbook_price(template_id)
    }

    /// Flea market base price of a template
    #[must_use]
    pub fn flea_price(&self, template_id: &str) -> Option<f64> {
        self.dataset.flea_price(template_id)
    }

    /// Whether the unit may write `table`
    #[inline]
    #[must_use]
    pub fn in_scope(&self, table: TableId) -> bool {
        self.scope.contains(&table)
    }

    fn check_scope(&self, table: TableId) -> Result<(), UnitError> {
        if self.in_scope(table) {
            Ok(())
        } else {
            Err(UnitError::ScopeViolation { table })
        }
    }

    /// Writable table, or a warning and `None` if it is absent
    ///
    /// # Errors
    /// `ScopeViolation` if the table is outside the unit's scope.
    pub fn require_table(&mut self, table: TableId) -> Result<Option<&mut Value>, UnitError> {
        self.check_scope(table)?;
        if !self.dataset.contains_table(table) {
            self.skip(format!("table {table} not found, skipping"));
            return Ok(None);
        }
        Ok(self.dataset.table_mut(table))
    }

    /// Writable entry, or a warning and `None` if it is absent
    ///
    /// # Errors
    /// `ScopeViolation` if the table is outside the unit's scope.
    pub fn require(&mut self, table: TableId, pointer: &str) -> Result<Option<&mut Value>, UnitError> {
        self.check_scope(table)?;
        if self.dataset.get(table, pointer).is_none() {
            self.skip(format!("{table}{pointer} not found, skipping"));
            return Ok(None);
        }
        Ok(self.dataset.get_mut(table, pointer))
    }

    /// Read an entry, or a warning and `None` if it is absent
    pub fn lookup(&self, table: TableId, pointer: &str) -> Option<&Value> {
        let found = self.dataset.get(table, pointer);
        if found.is_none() {
            self.skip(format!("{table}{pointer} not found, skipping"));
        }
        found
    }

    /// Write an entry; see [`Dataset::set`]
    ///
    /// # Errors
    /// `ScopeViolation` outside the scope, `Dataset` if the parent is missing.
    pub fn set(&mut self, table: TableId, pointer: &str, value: impl Into<Value>) -> Result<Value, UnitError> {
        self.check_scope(table)?;
        Ok(self.dataset.set(table, pointer, value.into())?)
    }

    /// Recorded baseline of a numeric entry; see [`Dataset::baseline`]
    ///
    /// # Errors
    /// `ScopeViolation` outside the scope, `Dataset` if the entry is missing
    /// or not a number.
    pub fn baseline(&mut self, table: TableId, pointer: &str) -> Result<f64, UnitError> {
        self.check_scope(table)?;
        Ok(self.dataset.baseline(table, pointer)?)
    }

    /// Set a numeric entry to `f(baseline)`.
    ///
    /// Returns the new value, or `None` (with a warning) if the entry is
    /// absent. Repeated calls always start from the recorded baseline.
    ///
    /// # Errors
    /// `ScopeViolation` outside the scope, `Dataset` if the entry is not a
    /// number.
    pub fn from_baseline(
        &mut self,
        table: TableId,
        pointer: &str,
        f: impl FnOnce(f64) -> f64,
    ) -> Result<Option<f64>, UnitError> {
        self.check_scope(table)?;
        if self.dataset.get(table, pointer).is_none() {
            self.skip(format!("{table}{pointer} not found, skipping"));
            return Ok(None);
        }
        let value = f(self.dataset.baseline(table, pointer)?);
        self.dataset.set(table, pointer, number(value))?;
        Ok(Some(value))
    }

    /// Set an entry to `baseline * factor`
    ///
    /// # Errors
    /// Same as [`from_baseline`](UnitContext::from_baseline).
    pub fn scale(&mut self, table: TableId, pointer: &str, factor: f64) -> Result<Option<f64>, UnitError> {
        self.from_baseline(table, pointer, |base| base * factor)
    }

    /// Set an entry to `round(baseline * factor)`
    ///
    /// # Errors
    /// Same as [`from_baseline`](UnitContext::from_baseline).
    pub fn scale_rounded(&mut self, table: TableId, pointer: &str, factor: f64) -> Result<Option<f64>, UnitError> {
        self.from_baseline(table, pointer, |base| (base * factor).round())
    }

    /// Append `items` to the array at `pointer`, skipping ones already present.
    ///
    /// Creates the array if its parent object exists. Returns the number of
    /// items added.
    ///
    /// # Errors
    /// `ScopeViolation` outside the scope, `Malformed` if the entry is not an
    /// array, `Dataset` if the parent is missing.
    pub fn union(&mut self, table: TableId, pointer: &str, items: &[Value]) -> Result<usize, UnitError> {
        self.append_missing(table, pointer, items, |list, item| list.contains(item))
    }

    /// Like [`union`](Self::union), but records are matched on their `key`
    /// field, so an appended record that was edited later is not appended
    /// again. Items without `key` fall back to whole-value comparison.
    ///
    /// # Errors
    /// Same as [`union`](Self::union).
    pub fn union_by(&mut self, table: TableId, pointer: &str, items: &[Value], key: &str) -> Result<usize, UnitError> {
        self.append_missing(table, pointer, items, |list, item| match item.get(key) {
            Some(id) => list.iter().any(|existing| existing.get(key) == Some(id)),
            None => list.contains(item),
        })
    }

    fn append_missing(
        &mut self,
        table: TableId,
        pointer: &str,
        items: &[Value],
        present: impl Fn(&[Value], &Value) -> bool,
    ) -> Result<usize, UnitError> {
        self.check_scope(table)?;
        if self.dataset.get(table, pointer).is_none() {
            self.dataset.set(table, pointer, Value::Array(Vec::new()))?;
        }
        let list = self
            .dataset
            .get_mut(table, pointer)
            .and_then(Value::as_array_mut)
            .ok_or_else(|| UnitError::malformed(table, pointer, "expected an array"))?;

        let mut added = 0;
        for item in items {
            if !present(list, item) {
                list.push(item.clone());
                added += 1;
            }
        }
        Ok(added)
    }

    /// Warn that something the unit works on is missing.
    ///
    /// If the unit then leaves its tables unchanged, its outcome is
    /// `skipped` with the first such message instead of `applied`.
    pub fn skip(&self, message: impl Into<String>) {
        let message = message.into();
        self.warn(&message);
        let _ = self.skipped.set(message);
    }

    /// First soft-skip message, if any
    #[must_use]
    pub fn skip_reason(&self) -> Option<&str> {
        self.skipped.get().map(String::as_str)
    }

    /// Warning tagged with the unit name
    pub fn warn(&self, message: impl AsRef<str>) {
        self.reporter
            .warning(format!("{}: {}: {}", self.section, self.unit, message.as_ref()));
    }

    /// Info message tagged with the unit name
    pub fn info(&self, message: impl AsRef<str>) {
        self.reporter
            .info(format!("{}: {}: {}", self.section, self.unit, message.as_ref()));
    }

    /// Debug message tagged with the unit name
    pub fn debug(&self, message: impl AsRef<str>) {
        if self.reporter.debug_enabled() {
            self.reporter
                .debug(format!("{}: {}: {}", self.section, self.unit, message.as_ref()));
        }
    }
}

/// JSON number for `value`, integral when it has no fractional part
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{Level, MemorySink};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn dataset() -> Dataset {
        Dataset::new()
            .with_table(TableId::HideoutSettings, json!({"generatorFuelFlowRate": 0.8}))
            .with_table(TableId::RagfairConfig, json!({"dynamic": {"blacklist": {"custom": ["a"]}}}))
            .with_table(TableId::Traders, json!({}))
    }

    fn run<T>(
        dataset: &mut Dataset,
        scope: &[TableId],
        f: impl FnOnce(&mut UnitContext<'_>) -> T,
    ) -> (T, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let reporter = Reporter::new(Arc::clone(&sink));
        let mut ctx = UnitContext::new(dataset, scope, "test", "unit", &reporter);
        (f(&mut ctx), sink)
    }

    #[test]
    fn write_outside_scope_is_rejected() {
        let mut data = dataset();
        let (result, _) = run(&mut data, &[TableId::HideoutSettings], |ctx| {
            ctx.set(TableId::Traders, "/x", 1)
        });
        assert!(matches!(
            result,
            Err(UnitError::ScopeViolation {
                table: TableId::Traders
            })
        ));
        assert_eq!(data.table(TableId::Traders), Some(&json!({})));
    }

    #[test]
    fn reads_are_unrestricted() {
        let mut data = dataset();
        let (value, _) = run(&mut data, &[], |ctx| ctx.number(TableId::HideoutSettings, "/generatorFuelFlowRate"));
        assert_eq!(value, Some(0.8));
    }

    #[test]
    fn require_warns_on_missing_entry() {
        let mut data = dataset();
        let (found, sink) = run(&mut data, &[TableId::HideoutSettings], |ctx| {
            ctx.require(TableId::HideoutSettings, "/nope").map(|v| v.is_some())
        });
        assert!(!found.unwrap());
        let warnings = sink.messages(Level::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("test: unit: hideout.settings/nope not found"));
    }

    #[test]
    fn require_table_warns_on_missing_table() {
        let mut data = dataset();
        let (found, sink) = run(&mut data, &[TableId::Items], |ctx| {
            ctx.require_table(TableId::Items).map(|v| v.is_some())
        });
        assert!(!found.unwrap());
        assert!(sink.contains("table templates.items not found"));
    }

    #[test]
    fn scale_uses_baseline() {
        let mut data = dataset();
        let pointer = "/generatorFuelFlowRate";
        for _ in 0..3 {
            run(&mut data, &[TableId::HideoutSettings], |ctx| {
                ctx.scale(TableId::HideoutSettings, pointer, 0.5).unwrap();
            });
        }
        assert_eq!(data.get(TableId::HideoutSettings, pointer), Some(&json!(0.4)));
    }

    #[test]
    fn union_skips_existing_items() {
        let mut data = dataset();
        let pointer = "/dynamic/blacklist/custom";
        let items = [json!("a"), json!("b")];
        let (added, _) = run(&mut data, &[TableId::RagfairConfig], |ctx| {
            ctx.union(TableId::RagfairConfig, pointer, &items).unwrap()
        });
        assert_eq!(added, 1);
        let (added, _) = run(&mut data, &[TableId::RagfairConfig], |ctx| {
            ctx.union(TableId::RagfairConfig, pointer, &items).unwrap()
        });
        assert_eq!(added, 0);
        assert_eq!(data.get(TableId::RagfairConfig, pointer), Some(&json!(["a", "b"])));
    }

    #[test]
    fn union_creates_missing_list() {
        let mut data = dataset();
        let (added, _) = run(&mut data, &[TableId::RagfairConfig], |ctx| {
            ctx.union(TableId::RagfairConfig, "/dynamic/blacklist/extra", &[json!(1)]).unwrap()
        });
        assert_eq!(added, 1);
    }

    #[test]
    fn union_by_matches_records_on_their_key() {
        let mut data = dataset();
        let pointer = "/dynamic/recipes";
        let recipes = [json!({"_id": "r1", "productionTime": 100}), json!({"_id": "r2", "productionTime": 40})];
        run(&mut data, &[TableId::RagfairConfig], |ctx| {
            ctx.union_by(TableId::RagfairConfig, pointer, &recipes, "_id").unwrap();
        });
        data.set(TableId::RagfairConfig, "/dynamic/recipes/0/productionTime", json!(50)).unwrap();

        let (added, _) = run(&mut data, &[TableId::RagfairConfig], |ctx| {
            ctx.union_by(TableId::RagfairConfig, pointer, &recipes, "_id").unwrap()
        });

        assert_eq!(added, 0);
        assert_eq!(
            data.get(TableId::RagfairConfig, pointer),
            Some(&json!([{"_id": "r1", "productionTime": 50}, {"_id": "r2", "productionTime": 40}]))
        );
    }

    #[test]
    fn number_is_integral_when_possible() {
        assert_eq!(number(50.0), json!(50));
        assert_eq!(number(0.25), json!(0.25));
    }
}
