//! Error types for dataset access

use crate::table::TableId;

/// Errors raised by [`Dataset`](crate::Dataset) operations
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Table name is not one the engine knows
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// Table is absent from the dataset
    #[error("table not found: {0}")]
    MissingTable(TableId),

    /// Pointer does not resolve inside the table
    #[error("entry not found: {table}{pointer}")]
    MissingEntry {
        /// Table that was searched
        table: TableId,
        /// JSON pointer that failed to resolve
        pointer: String,
    },

    /// Entry exists but does not hold a number
    #[error("entry is not a number: {table}{pointer}")]
    NotANumber {
        /// Table that was searched
        table: TableId,
        /// JSON pointer of the entry
        pointer: String,
    },

    /// Dataset dump could not be (de)serialized
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DatasetError {
    /// Create missing entry error
    pub fn missing_entry(table: TableId, pointer: impl Into<String>) -> Self {
        Self::MissingEntry {
            table,
            pointer: pointer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_display() {
        let err = DatasetError::missing_entry(TableId::Items, "/abc/_props");
        assert_eq!(err.to_string(), "entry not found: templates.items/abc/_props");
    }

    #[test]
    fn missing_table_display() {
        let err = DatasetError::MissingTable(TableId::RagfairConfig);
        assert_eq!(err.to_string(), "table not found: config.ragfair");
    }
}
