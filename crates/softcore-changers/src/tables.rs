//! Read helpers over the host's table layouts
//!
//! Units collect the pointers they want to edit with these helpers first and
//! write through the [`UnitContext`] afterwards, so reads never hold a borrow
//! across a write.

use serde_json::Value;
use softcore_dataset::{ptr, TableId};
use softcore_engine::{UnitContext, UnitError};

/// Upper bound on `_parent` hops; the host's item tree is far shallower
const MAX_PARENT_DEPTH: usize = 32;

/// Keys of the object at `pointer`
pub(crate) fn keys(ctx: &UnitContext<'_>, table: TableId, pointer: &str) -> Vec<String> {
    ctx.get(table, pointer)
        .and_then(Value::as_object)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

/// Length of the array at `pointer`, zero if it is not an array
pub(crate) fn len(ctx: &UnitContext<'_>, table: TableId, pointer: &str) -> usize {
    ctx.get(table, pointer).and_then(Value::as_array).map_or(0, Vec::len)
}

/// String field of a record
pub(crate) fn str_field<'v>(record: &'v Value, field: &str) -> Option<&'v str> {
    record.get(field).and_then(Value::as_str)
}

/// Indices of the array elements at `pointer` matching `predicate`
pub(crate) fn positions(
    ctx: &UnitContext<'_>,
    table: TableId,
    pointer: &str,
    predicate: impl Fn(&Value) -> bool,
) -> Vec<usize> {
    ctx.get(table, pointer)
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .enumerate()
                .filter(|(_, value)| predicate(value))
                .map(|(index, _)| index)
                .collect()
        })
        .unwrap_or_default()
}

/// Index of the hideout area with the given `type`
pub(crate) fn area_index(ctx: &UnitContext<'_>, area_type: i64) -> Option<usize> {
    positions(ctx, TableId::HideoutAreas, "", |area| {
        area.get("type").and_then(Value::as_i64) == Some(area_type)
    })
    .first()
    .copied()
}

/// Pointers to every construction requirement of one hideout area
pub(crate) fn stage_requirements(ctx: &UnitContext<'_>, area: usize) -> Vec<(String, Value)> {
    let mut found = Vec::new();
    for stage in keys(ctx, TableId::HideoutAreas, &ptr!(area, "stages")) {
        let base = ptr!(area, "stages", stage, "requirements");
        if let Some(list) = ctx.get(TableId::HideoutAreas, &base).and_then(Value::as_array) {
            for (index, requirement) in list.iter().enumerate() {
                found.push((format!("{base}/{index}"), requirement.clone()));
            }
        }
    }
    found
}

/// Index of a template's handbook entry
pub(crate) fn handbook_index(ctx: &UnitContext<'_>, template_id: &str) -> Option<usize> {
    positions(ctx, TableId::Handbook, "/Items", |entry| {
        str_field(entry, "Id") == Some(template_id)
    })
    .first()
    .copied()
}

/// Indices of hideout recipes matching `predicate`
pub(crate) fn recipes(ctx: &UnitContext<'_>, predicate: impl Fn(&Value) -> bool) -> Vec<usize> {
    positions(ctx, TableId::HideoutProduction, "/recipes", predicate)
}

/// Ids of concrete (`_type == "Item"`) templates
pub(crate) fn item_ids(ctx: &UnitContext<'_>) -> Vec<String> {
    ctx.get(TableId::Items, "")
        .and_then(Value::as_object)
        .map(|items| {
            items
                .iter()
                .filter(|(_, item)| str_field(item, "_type") == Some("Item"))
                .map(|(id, _)| id.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// A template record
pub(crate) fn item<'c>(ctx: &'c UnitContext<'_>, template_id: &str) -> Option<&'c Value> {
    ctx.get(TableId::Items, &ptr!(template_id))
}

/// Whether `template_id` descends from any of `classes`
pub(crate) fn is_of_base_class(ctx: &UnitContext<'_>, template_id: &str, classes: &[&str]) -> bool {
    let mut current = template_id.to_string();
    for _ in 0..MAX_PARENT_DEPTH {
        let Some(parent) = item(ctx, &current).and_then(|record| str_field(record, "_parent")) else {
            return false;
        };
        if parent.is_empty() {
            return false;
        }
        if classes.contains(&parent) {
            return true;
        }
        current = parent.to_string();
    }
    false
}

/// Pointer to the `_props` of a template's first grid
pub(crate) fn grid_props(template_id: &str) -> String {
    ptr!(template_id, "_props", "Grids", 0, "_props")
}

/// Resize a container's first grid; warns and returns `false` if it has none
pub(crate) fn resize_grid(
    ctx: &mut UnitContext<'_>,
    template_id: &str,
    cells_h: Option<u32>,
    cells_v: u32,
) -> Result<bool, UnitError> {
    let props = grid_props(template_id);
    if ctx.get(TableId::Items, &props).is_none() {
        ctx.skip(format!("failed to modify container {template_id}, skipping"));
        return Ok(false);
    }
    ctx.set(TableId::Items, &format!("{props}/cellsV"), cells_v)?;
    if let Some(cells_h) = cells_h {
        ctx.set(TableId::Items, &format!("{props}/cellsH"), cells_h)?;
    }
    Ok(true)
}

/// Write an entry whose parent exists; warns and returns `false` otherwise
pub(crate) fn assign(
    ctx: &mut UnitContext<'_>,
    table: TableId,
    pointer: &str,
    value: impl Into<Value>,
) -> Result<bool, UnitError> {
    let parent = pointer.rsplit_once('/').map_or("", |(parent, _)| parent);
    if ctx.get(table, parent).is_none() {
        ctx.skip(format!("{table}{parent} not found, skipping"));
        return Ok(false);
    }
    ctx.set(table, pointer, value)?;
    Ok(true)
}

/// Strings as JSON values, for set unions
pub(crate) fn strings<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<Value> {
    ids.into_iter().map(Value::from).collect()
}
