use core::fmt;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Marker prefix on string identifiers routing a readable entity into the
/// hub's auxiliary registration bucket.
pub const EXTRA_MARKER: char = 'x';

/// Entity identifier in a platform document: a non-negative frame offset or
/// a string token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityKey {
    Index(u64),
    Token(String),
}

impl EntityKey {
    /// Parse a YAML mapping key. Anything but a non-negative integer or a
    /// string is not a valid identifier.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(EntityKey::Index),
            Value::String(s) => Some(EntityKey::Token(s.clone())),
            _ => None,
        }
    }

    pub fn to_yaml(&self) -> Value {
        match self {
            EntityKey::Index(i) => Value::from(*i),
            EntityKey::Token(t) => Value::from(t.as_str()),
        }
    }

    /// String identifiers starting with the marker flag the auxiliary
    /// ("extra") readable registration bucket.
    pub fn is_extra(&self) -> bool {
        matches!(self, EntityKey::Token(t) if t.starts_with(EXTRA_MARKER))
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Index(i) => write!(f, "{i}"),
            EntityKey::Token(t) => write!(f, "{t}"),
        }
    }
}

/// The identifier-field contract: every concrete descriptor variant exposes
/// exactly one of these field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdField {
    /// Writable command-frame address.
    Set,
    /// Readable response-frame address.
    Top,
}

impl IdField {
    pub fn name(&self) -> &'static str {
        match self {
            IdField::Set => "set",
            IdField::Top => "top",
        }
    }
}

/// Orthogonal behavioral capabilities driving registration at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub readable: bool,
    pub writable: bool,
}

impl Capabilities {
    pub const READABLE: Self = Self {
        readable: true,
        writable: false,
    };
    pub const WRITABLE: Self = Self {
        readable: false,
        writable: true,
    };
    pub const BOTH: Self = Self {
        readable: true,
        writable: true,
    };
}
