//! extractor-spec: bit-level value extractor descriptions for heat pump frames
//!
//! This crate models how a physical quantity is read from (and, for writable
//! entities, written back to) a raw response/command byte buffer at bit
//! granularity. It provides the closed set of extractor variants, a property
//! bag utility for field consumption, and the first-match-in-order trial
//! construction resolver used by the entity registry.

mod bag;
pub use bag::FieldBag;

mod error;
pub use error::{format_attempts, Attempt, ExtractorError, Result};

mod types;
pub use types::{ExtractorKind, ValueType};

mod variants;
pub use variants::{
    BinarySpec, ExtractorSpec, FloatSpec, LambdaSpec, StringArraySpec, StringMapSpec,
};

mod resolve;
pub use resolve::resolve_extractor;
