use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::input::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Team,
    RunId,
    Type,
    Model,
}

impl MetadataField {
    pub fn key(self) -> &'static str {
        match self {
            MetadataField::Team => "team",
            MetadataField::RunId => "run_id",
            MetadataField::Type => "type",
            MetadataField::Model => "model",
        }
    }
}

/// Recognized metadata keys and the value used when a key is absent or null.
pub const METADATA_DEFAULTS: [(MetadataField, &str); 4] = [
    (MetadataField::Team, "unknown"),
    (MetadataField::RunId, "unknown"),
    (MetadataField::Type, "unknown"),
    (MetadataField::Model, "unknown"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    pub team: String,
    pub run_id: String,
    pub run_type: String,
    pub model: String,
}

impl RunMetadata {
    pub fn get(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::Team => &self.team,
            MetadataField::RunId => &self.run_id,
            MetadataField::Type => &self.run_type,
            MetadataField::Model => &self.model,
        }
    }

    fn slot(&mut self, field: MetadataField) -> &mut String {
        match field {
            MetadataField::Team => &mut self.team,
            MetadataField::RunId => &mut self.run_id,
            MetadataField::Type => &mut self.run_type,
            MetadataField::Model => &mut self.model,
        }
    }
}

pub fn load_metadata(path: &Path) -> Result<RunMetadata, InputError> {
    let raw = fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
    parse_metadata(&raw)
}

pub fn parse_metadata(raw: &str) -> Result<RunMetadata, InputError> {
    let doc: Value = serde_json::from_str(raw)
        .map_err(|e| InputError::Parse(format!("metadata is not valid JSON: {e}")))?;
    let Value::Object(map) = doc else {
        return Err(InputError::Parse(
            "metadata must be a JSON object".to_string(),
        ));
    };
    from_map(&map)
}

fn from_map(map: &Map<String, Value>) -> Result<RunMetadata, InputError> {
    let mut meta = RunMetadata {
        team: String::new(),
        run_id: String::new(),
        run_type: String::new(),
        model: String::new(),
    };
    for (field, default) in METADATA_DEFAULTS {
        let value = match map.get(field.key()) {
            None | Some(Value::Null) => {
                tracing::debug!(field = field.key(), "metadata field absent; using default");
                default.to_string()
            }
            Some(Value::String(s)) => s.clone(),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
            Some(_) => {
                return Err(InputError::Parse(format!(
                    "metadata field {:?} must be a string",
                    field.key()
                )));
            }
        };
        *meta.slot(field) = value;
    }
    Ok(meta)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/metadata.rs"]
mod tests;
