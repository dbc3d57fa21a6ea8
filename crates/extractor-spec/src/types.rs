use core::fmt;
use serde::{Deserialize, Serialize};

/// Decoded value type an extractor produces (and accepts on encode).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Bool,
    Float,
    Text,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => write!(f, "bool"),
            ValueType::Float => write!(f, "float"),
            ValueType::Text => write!(f, "text"),
        }
    }
}

/// Identifier for one extractor variant in an allowed list.
///
/// The lambda variant carries its decoded value type because that type is
/// fixed by the enclosing entity kind, never supplied in configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ExtractorKind {
    Binary,
    Float,
    StringArray,
    StringMap,
    Lambda(ValueType),
}

impl ExtractorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExtractorKind::Binary => "binary",
            ExtractorKind::Float => "float",
            ExtractorKind::StringArray => "string_array",
            ExtractorKind::StringMap => "string_map",
            ExtractorKind::Lambda(_) => "lambda",
        }
    }

    /// Field names this variant consumes from a property bag.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ExtractorKind::Binary => &["byte", "bit"],
            ExtractorKind::Float => &["byte", "bit_width", "offset", "multiplier"],
            ExtractorKind::StringArray | ExtractorKind::StringMap => {
                &["byte", "bit", "bit_width", "labels"]
            }
            ExtractorKind::Lambda(_) => &["decoder"],
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
