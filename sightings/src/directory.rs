use std::collections::BTreeMap;

use crate::{ResultTable, SightingsError};

/// Column holding the name shown to the user.
pub const DISPLAY_NAME_COLUMN: &str = "Vernacular Name";
/// Column holding the identifier/URL for a record.
pub const URL_COLUMN: &str = "Species";

/// Display name → identifier/URL, rebuilt from scratch on every search.
/// Later records with the same display name overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalDirectory {
    entries: BTreeMap<String, String>,
}

impl AnimalDirectory {
    /// Fails with [`SightingsError::MissingColumn`] when the service result
    /// does not carry the expected columns; no fallback mapping is guessed.
    pub fn from_table(table: &ResultTable) -> Result<AnimalDirectory, SightingsError> {
        let name_idx = table
            .column_index(DISPLAY_NAME_COLUMN)
            .ok_or_else(|| SightingsError::MissingColumn(DISPLAY_NAME_COLUMN.into()))?;
        let url_idx = table
            .column_index(URL_COLUMN)
            .ok_or_else(|| SightingsError::MissingColumn(URL_COLUMN.into()))?;

        let entries = table
            .rows
            .iter()
            .filter_map(|row| Some((row.get(name_idx)?.clone(), row.get(url_idx)?.clone())))
            .collect();
        Ok(AnimalDirectory { entries })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn url(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
