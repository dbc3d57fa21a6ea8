//! The closed set of extractor variants.
//!
//! Each variant is pure data describing where a value lives inside a raw
//! byte buffer and how the downstream generated code must decode and encode
//! it. Construction consumes a pre-partitioned field mapping; shape failures
//! reject the variant (the resolver tries the next one), domain-invariant
//! failures abort the whole resolution pass.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::types::{ExtractorKind, ValueType};

/// Why a single variant refused to construct.
#[derive(Debug)]
pub(crate) enum BuildRejection {
    /// Required fields missing or of a shape this variant cannot read.
    /// A matching signal: the resolver moves on to the next variant.
    Mismatch(String),
    /// Shape matched but a domain invariant is violated. An authoring bug:
    /// never swallowed into "try the next variant".
    Semantic(String),
}

fn mismatch(err: serde_yaml::Error) -> BuildRejection {
    BuildRejection::Mismatch(err.to_string())
}

/// Single bit flag at byte offset `byte`, bit position `bit`.
///
/// Wire contract: the flag occupies a two-bit field. Raw `0b10` decodes to
/// true, `0b01` to false, `0b00` means no data yet and `0b11` is invalid;
/// encode writes `0b10`/`0b01` back into the same positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinarySpec {
    pub byte: u32,
    pub bit: u8,
}

impl BinarySpec {
    pub(crate) fn from_fields(fields: Mapping) -> Result<Self, BuildRejection> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            byte: u32,
            bit: u8,
        }
        let raw: Raw = serde_yaml::from_value(Value::Mapping(fields)).map_err(mismatch)?;
        check_bit(raw.bit)?;
        Ok(Self {
            byte: raw.byte,
            bit: raw.bit,
        })
    }
}

/// Linear numeric decode: `value = raw * multiplier + offset`, with `raw`
/// read little-endian as a `bit_width`-wide field starting at `byte`.
/// Encode is the inverse mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatSpec {
    pub byte: u32,
    pub bit_width: u8,
    pub offset: f64,
    pub multiplier: f64,
}

impl FloatSpec {
    pub(crate) fn from_fields(fields: Mapping) -> Result<Self, BuildRejection> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            byte: u32,
            #[serde(default = "default_bit_width")]
            bit_width: u8,
            #[serde(default)]
            offset: f64,
            #[serde(default = "default_multiplier")]
            multiplier: f64,
        }
        fn default_bit_width() -> u8 {
            8
        }
        fn default_multiplier() -> f64 {
            1.0
        }
        let raw: Raw = serde_yaml::from_value(Value::Mapping(fields)).map_err(mismatch)?;
        if raw.bit_width == 0 || raw.bit_width % 8 != 0 || raw.bit_width > 32 {
            return Err(BuildRejection::Semantic(format!(
                "bit_width must be a multiple of 8 in 8..=32, got {}",
                raw.bit_width
            )));
        }
        if raw.multiplier <= 0.0 || !raw.multiplier.is_finite() {
            return Err(BuildRejection::Semantic(format!(
                "multiplier must be a positive finite number, got {}",
                raw.multiplier
            )));
        }
        Ok(Self {
            byte: raw.byte,
            bit_width: raw.bit_width,
            offset: raw.offset,
            multiplier: raw.multiplier,
        })
    }
}

/// Enumerated value keyed by a small in-byte integer: the raw `bit_width`
/// field at (`byte`, `bit`) indexes into `labels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringArraySpec {
    pub byte: u32,
    pub bit: u8,
    pub bit_width: u8,
    pub labels: Vec<String>,
}

impl StringArraySpec {
    pub(crate) fn from_fields(fields: Mapping) -> Result<Self, BuildRejection> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            byte: u32,
            bit: u8,
            bit_width: u8,
            labels: Vec<String>,
        }
        let raw: Raw = serde_yaml::from_value(Value::Mapping(fields)).map_err(mismatch)?;
        check_bit(raw.bit)?;
        check_in_byte_width(raw.bit, raw.bit_width)?;
        if raw.labels.is_empty() {
            return Err(BuildRejection::Semantic(
                "labels must not be empty".to_string(),
            ));
        }
        if raw.labels.len() > (1usize << raw.bit_width) {
            tracing::warn!(
                labels = raw.labels.len(),
                bit_width = raw.bit_width,
                "label table larger than the addressable raw range"
            );
        }
        Ok(Self {
            byte: raw.byte,
            bit: raw.bit,
            bit_width: raw.bit_width,
            labels: raw.labels,
        })
    }
}

/// Enumerated value keyed by a tuple of raw bytes. All keys share one arity;
/// a single integer key is the arity-1 shorthand. Entry order is preserved
/// because it is also the option order presented for the entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringMapSpec {
    pub byte: u32,
    pub bit: u8,
    pub bit_width: u8,
    pub labels: Vec<(Vec<u8>, String)>,
    pub key_len: usize,
}

impl StringMapSpec {
    pub(crate) fn from_fields(fields: Mapping) -> Result<Self, BuildRejection> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            byte: u32,
            bit: u8,
            bit_width: u8,
            labels: Mapping,
        }
        let raw: Raw = serde_yaml::from_value(Value::Mapping(fields)).map_err(mismatch)?;
        check_bit(raw.bit)?;
        check_in_byte_width(raw.bit, raw.bit_width)?;
        if raw.labels.is_empty() {
            return Err(BuildRejection::Semantic(
                "labels must not be empty".to_string(),
            ));
        }

        let mut labels = Vec::with_capacity(raw.labels.len());
        for (key, value) in &raw.labels {
            let label = value.as_str().ok_or_else(|| {
                BuildRejection::Semantic(format!("label for key `{key:?}` must be a string"))
            })?;
            labels.push((label_key(key)?, label.to_string()));
        }

        // Partial tuples are an authoring bug, not a matching signal.
        let key_len = labels[0].0.len();
        if let Some((bad, _)) = labels.iter().find(|(k, _)| k.len() != key_len) {
            return Err(BuildRejection::Semantic(format!(
                "label keys must all share one arity: expected {key_len}, found {}",
                bad.len()
            )));
        }

        Ok(Self {
            byte: raw.byte,
            bit: raw.bit,
            bit_width: raw.bit_width,
            labels,
            key_len,
        })
    }
}

/// Convert one label key: a bare integer or a sequence of byte values.
fn label_key(key: &Value) -> Result<Vec<u8>, BuildRejection> {
    match key {
        Value::Number(_) => Ok(vec![key_byte(key)?]),
        Value::Sequence(parts) => parts.iter().map(key_byte).collect(),
        other => Err(BuildRejection::Semantic(format!(
            "label keys must be byte values or byte tuples, got `{other:?}`"
        ))),
    }
}

fn key_byte(value: &Value) -> Result<u8, BuildRejection> {
    value
        .as_u64()
        .and_then(|raw| u8::try_from(raw).ok())
        .ok_or_else(|| {
            BuildRejection::Semantic(format!("label key component `{value:?}` is not a byte"))
        })
}

/// Custom decode expression over the full byte buffer, producing an optional
/// value of `value_type`. The type is fixed by the enclosing entity kind and
/// never read from configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LambdaSpec {
    pub decoder: String,
    pub value_type: ValueType,
}

impl LambdaSpec {
    pub(crate) fn from_fields(
        fields: Mapping,
        value_type: ValueType,
    ) -> Result<Self, BuildRejection> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            decoder: String,
        }
        let raw: Raw = serde_yaml::from_value(Value::Mapping(fields)).map_err(mismatch)?;
        if raw.decoder.trim().is_empty() {
            return Err(BuildRejection::Semantic(
                "decoder expression must not be empty".to_string(),
            ));
        }
        if let Err(err) = evalexpr::build_operator_tree(&raw.decoder) {
            return Err(BuildRejection::Semantic(format!(
                "decoder expression does not parse: {err}"
            )));
        }
        Ok(Self {
            decoder: raw.decoder,
            value_type,
        })
    }
}

fn check_bit(bit: u8) -> Result<(), BuildRejection> {
    if bit > 7 {
        return Err(BuildRejection::Semantic(format!(
            "bit must be in 0..=7, got {bit}"
        )));
    }
    Ok(())
}

fn check_in_byte_width(bit: u8, bit_width: u8) -> Result<(), BuildRejection> {
    if bit_width == 0 || bit_width > 8 || bit + bit_width > 8 {
        return Err(BuildRejection::Semantic(format!(
            "field of width {bit_width} at bit {bit} does not fit in one byte"
        )));
    }
    Ok(())
}

/// A fully built extractor: pure data handed to the emission collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractorSpec {
    Binary(BinarySpec),
    Float(FloatSpec),
    StringArray(StringArraySpec),
    StringMap(StringMapSpec),
    Lambda(LambdaSpec),
}

impl ExtractorSpec {
    pub(crate) fn try_build(kind: ExtractorKind, fields: Mapping) -> Result<Self, BuildRejection> {
        match kind {
            ExtractorKind::Binary => BinarySpec::from_fields(fields).map(Self::Binary),
            ExtractorKind::Float => FloatSpec::from_fields(fields).map(Self::Float),
            ExtractorKind::StringArray => {
                StringArraySpec::from_fields(fields).map(Self::StringArray)
            }
            ExtractorKind::StringMap => StringMapSpec::from_fields(fields).map(Self::StringMap),
            ExtractorKind::Lambda(value_type) => {
                LambdaSpec::from_fields(fields, value_type).map(Self::Lambda)
            }
        }
    }

    pub fn kind(&self) -> ExtractorKind {
        match self {
            ExtractorSpec::Binary(_) => ExtractorKind::Binary,
            ExtractorSpec::Float(_) => ExtractorKind::Float,
            ExtractorSpec::StringArray(_) => ExtractorKind::StringArray,
            ExtractorSpec::StringMap(_) => ExtractorKind::StringMap,
            ExtractorSpec::Lambda(spec) => ExtractorKind::Lambda(spec.value_type),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            ExtractorSpec::Binary(_) => ValueType::Bool,
            ExtractorSpec::Float(_) => ValueType::Float,
            ExtractorSpec::StringArray(_) | ExtractorSpec::StringMap(_) => ValueType::Text,
            ExtractorSpec::Lambda(spec) => spec.value_type,
        }
    }

    /// Ordered option labels for enumerated extractors, if any.
    pub fn labels(&self) -> Option<Vec<&str>> {
        match self {
            ExtractorSpec::StringArray(spec) => {
                Some(spec.labels.iter().map(String::as_str).collect())
            }
            ExtractorSpec::StringMap(spec) => {
                Some(spec.labels.iter().map(|(_, label)| label.as_str()).collect())
            }
            _ => None,
        }
    }

    pub fn multiplier(&self) -> Option<f64> {
        match self {
            ExtractorSpec::Float(spec) => Some(spec.multiplier),
            _ => None,
        }
    }
}
