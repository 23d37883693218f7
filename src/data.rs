use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A category as returned by `/categories`. Odd entries render blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

/// One image from `/images/search`. Missing or null fields render blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
}

/// Strings pass through, numbers and bools are stringified, anything else
/// (null, arrays, objects) becomes empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// image id -> display name. Entries are only ever added.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameAssignments {
    pub names: BTreeMap<String, String>,
}

impl NameAssignments {
    /// Returns the existing name, or assigns the one produced by `pick`.
    /// The flag is true when a new entry was created.
    pub fn get_or_assign(&mut self, image_id: &str, pick: impl FnOnce() -> String) -> (&str, bool) {
        let mut created = false;
        let name = self.names.entry(image_id.to_string()).or_insert_with(|| {
            created = true;
            pick()
        });
        (name.as_str(), created)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
