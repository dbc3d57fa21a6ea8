use serde_yaml::{Mapping, Value};

use crate::error::{ExtractorError, Result};

/// Heterogeneous property bag: field name -> scalar, sequence or mapping.
///
/// Resolution layers consume fields out of a bag by declared field-name sets
/// and hand the untouched remainder to the next layer. Insertion order is
/// preserved so aggregated error reports stay deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldBag {
    fields: Mapping,
}

impl FieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a parsed YAML mapping. Every key must be a string.
    pub fn from_mapping(map: Mapping) -> Result<Self> {
        for key in map.keys() {
            if !key.is_string() {
                return Err(ExtractorError::InvalidBag(format!(
                    "field names must be strings, got `{key:?}`"
                )));
            }
        }
        Ok(Self { fields: map })
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.fields.insert(Value::String(name.to_string()), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys().any(|key| key == name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().filter_map(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Partition the bag: fields named in `names` are taken, the rest stays.
    pub fn split(&self, names: &[&str]) -> (Mapping, FieldBag) {
        let mut taken = Mapping::new();
        let mut rest = Mapping::new();
        for (key, value) in &self.fields {
            let matched = key.as_str().is_some_and(|name| names.contains(&name));
            if matched {
                taken.insert(key.clone(), value.clone());
            } else {
                rest.insert(key.clone(), value.clone());
            }
        }
        (taken, FieldBag { fields: rest })
    }

    pub fn into_mapping(self) -> Mapping {
        self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.fields)
    }
}
