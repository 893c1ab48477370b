use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Record identities are positive integers assigned by the store.
pub type RecordId = u64;

/// A single pokedex entry as persisted in the collection file.
///
/// Records are open JSON objects: anything beyond the modeled fields is kept
/// in `extra` so a read-modify-write cycle never drops data the service does
/// not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A place where a pokemon can be encountered, nested under its record.
/// Only `id` is structural; descriptive fields stay in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: RecordId,
    #[serde(flatten)]
    pub details: HashMap<String, serde_json::Value>,
}

impl Pokemon {
    pub fn new(id: RecordId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            locations: None,
            extra: HashMap::new(),
        }
    }

    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = Some(locations);
        self
    }
}

impl Location {
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        let mut details = HashMap::new();
        details.insert(
            "name".to_string(),
            serde_json::Value::String(name.into()),
        );
        Self { id, details }
    }
}
