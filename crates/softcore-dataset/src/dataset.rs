//! The dataset handle

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::DatasetError;
use crate::table::TableId;

/// Read-write handle over the host's reference tables.
///
/// The host owns the data for its whole lifetime and lends it to a patch run
/// as `&mut Dataset`; nothing in the engine can hold on to it afterwards.
///
/// Besides the tables themselves the handle remembers the first value seen
/// for every numeric field a unit scales (its *baseline*), so that applying a
/// multiplier twice yields the same result as applying it once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    tables: BTreeMap<TableId, Value>,
    baselines: BTreeMap<(TableId, String), Value>,
}

impl Dataset {
    /// Create an empty dataset
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style table insertion
    #[inline]
    #[must_use]
    pub fn with_table(mut self, id: TableId, value: Value) -> Self {
        self.tables.insert(id, value);
        self
    }

    /// Insert or replace a whole table, returning the previous one
    pub fn insert_table(&mut self, id: TableId, value: Value) -> Option<Value> {
        self.tables.insert(id, value)
    }

    /// Check whether a table is present
    #[inline]
    #[must_use]
    pub fn contains_table(&self, id: TableId) -> bool {
        self.tables.contains_key(&id)
    }

    /// Identifiers of the present tables, in serialization order
    pub fn table_ids(&self) -> impl Iterator<Item = TableId> + '_ {
        self.tables.keys().copied()
    }

    /// Borrow a table
    #[inline]
    #[must_use]
    pub fn table(&self, id: TableId) -> Option<&Value> {
        self.tables.get(&id)
    }

    /// Mutably borrow a table
    #[inline]
    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Value> {
        self.tables.get_mut(&id)
    }

    /// Resolve a pointer inside a table
    #[must_use]
    pub fn get(&self, id: TableId, pointer: &str) -> Option<&Value> {
        self.tables.get(&id)?.pointer(pointer)
    }

    /// Mutably resolve a pointer inside a table
    pub fn get_mut(&mut self, id: TableId, pointer: &str) -> Option<&mut Value> {
        self.tables.get_mut(&id)?.pointer_mut(pointer)
    }

    /// Read a numeric entry
    ///
    /// # Errors
    /// `MissingEntry` if the pointer does not resolve, `NotANumber` if it
    /// resolves to anything but a number.
    pub fn number(&self, id: TableId, pointer: &str) -> Result<f64, DatasetError> {
        let value = self
            .get(id, pointer)
            .ok_or_else(|| DatasetError::missing_entry(id, pointer))?;
        value.as_f64().ok_or_else(|| DatasetError::NotANumber {
            table: id,
            pointer: pointer.to_string(),
        })
    }

    /// Write an entry, creating the final key if its parent object exists.
    ///
    /// Returns the replaced value, or `Value::Null` when the key was created.
    ///
    /// # Errors
    /// `MissingTable` if the table is absent; `MissingEntry` if neither the
    /// target nor its parent object resolves.
    pub fn set(&mut self, id: TableId, pointer: &str, value: Value) -> Result<Value, DatasetError> {
        let table = self
            .tables
            .get_mut(&id)
            .ok_or(DatasetError::MissingTable(id))?;

        if let Some(slot) = table.pointer_mut(pointer) {
            return Ok(std::mem::replace(slot, value));
        }

        let (parent, key) = pointer
            .rsplit_once('/')
            .ok_or_else(|| DatasetError::missing_entry(id, pointer))?;
        match table.pointer_mut(parent) {
            Some(Value::Object(map)) => {
                map.insert(unescape(key), value);
                Ok(Value::Null)
            }
            _ => Err(DatasetError::missing_entry(id, pointer)),
        }
    }

    /// Baseline of a numeric entry.
    ///
    /// The first call records the current value; later calls return the
    /// recorded one even if the entry has since been rewritten.
    ///
    /// # Errors
    /// Same as [`Dataset::number`] on the first call for a pointer.
    pub fn baseline(&mut self, id: TableId, pointer: &str) -> Result<f64, DatasetError> {
        let key = (id, pointer.to_string());
        if let Some(recorded) = self.baselines.get(&key).and_then(Value::as_f64) {
            return Ok(recorded);
        }
        let current = self.number(id, pointer)?;
        self.baselines.insert(key, Value::from(current));
        Ok(current)
    }

    /// Copy the given tables (and their baselines) for a later [`restore`](Dataset::restore)
    #[must_use]
    pub fn snapshot(&self, scope: &[TableId]) -> Snapshot {
        let tables = scope
            .iter()
            .map(|id| (*id, self.tables.get(id).cloned()))
            .collect();
        let baselines = self
            .baselines
            .iter()
            .filter(|((table, _), _)| scope.contains(table))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Snapshot { tables, baselines }
    }

    /// Put the tables captured by `snapshot` back exactly as they were
    pub fn restore(&mut self, snapshot: Snapshot) {
        let scope: Vec<TableId> = snapshot.tables.iter().map(|(id, _)| *id).collect();
        for (id, value) in snapshot.tables {
            match value {
                Some(value) => {
                    self.tables.insert(id, value);
                }
                None => {
                    self.tables.remove(&id);
                }
            }
        }
        self.baselines.retain(|(table, _), _| !scope.contains(table));
        self.baselines.extend(snapshot.baselines);
    }

    /// Parse a dataset dump (an object keyed by table name)
    ///
    /// # Errors
    /// Fails on malformed JSON or unknown table names.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the tables; output is stable for equal datasets
    ///
    /// # Errors
    /// Returns error if serialization fails (rare for JSON)
    pub fn to_json_pretty(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tables.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tables = BTreeMap::<TableId, Value>::deserialize(deserializer)?;
        Ok(Self {
            tables,
            baselines: BTreeMap::new(),
        })
    }
}

/// Saved copy of a set of tables
#[derive(Debug, Clone)]
pub struct Snapshot {
    tables: Vec<(TableId, Option<Value>)>,
    baselines: Vec<((TableId, String), Value)>,
}

impl Snapshot {
    /// Tables covered by this snapshot
    pub fn scope(&self) -> impl Iterator<Item = TableId> + '_ {
        self.tables.iter().map(|(id, _)| *id)
    }

    /// Whether every covered table in `dataset` still equals its captured state
    #[must_use]
    pub fn unchanged_in(&self, dataset: &Dataset) -> bool {
        self.tables
            .iter()
            .all(|(id, value)| dataset.tables.get(id) == value.as_ref())
    }
}

/// Price queries against the handbook and flea price tables
pub trait PriceLookup {
    /// Handbook (trader reference) price of a template
    fn handbook_price(&self, template_id: &str) -> Option<f64>;

    /// Flea market base price of a template
    fn flea_price(&self, template_id: &str) -> Option<f64>;
}

impl PriceLookup for Dataset {
    fn handbook_price(&self, template_id: &str) -> Option<f64> {
        self.get(TableId::Handbook, "/Items")?
            .as_array()?
            .iter()
            .find(|entry| entry.get("Id").and_then(Value::as_str) == Some(template_id))?
            .get("Price")?
            .as_f64()
    }

    fn flea_price(&self, template_id: &str) -> Option<f64> {
        self.table(TableId::Prices)?.get(template_id)?.as_f64()
    }
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
