use extractor_spec::{format_attempts, Attempt, ExtractorError};
use thiserror::Error;

use crate::types::EntityKey;

pub type Result<T, E = RegistryError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Structural defect in a descriptor variant declaration, detected at
    /// platform registration with no document involved.
    #[error("descriptor schema `{descriptor}` is invalid: {reason}")]
    SchemaAuthoring { descriptor: String, reason: String },

    /// Every registered descriptor variant rejected the entry; `attempts`
    /// preserves registration order.
    #[error("no descriptor variant matched entity `{key}`:{}", format_attempts(.attempts))]
    NoMatchingDescriptor {
        key: EntityKey,
        attempts: Vec<Attempt>,
    },

    /// A descriptor matched its field shape but violated a domain invariant.
    #[error("invalid `{descriptor}` descriptor configuration: {reason}")]
    Semantic {
        descriptor: &'static str,
        reason: String,
    },

    /// A platform must resolve at least one entity.
    #[error("platform `{platform}` document is empty")]
    EmptyDocument { platform: String },

    /// Writable entities declare their owning hub exactly once.
    #[error("entity `{entity}` is already parented to `{parent}`")]
    ParentRebound { entity: String, parent: String },

    #[error(transparent)]
    Extractor(#[from] ExtractorError),
}
