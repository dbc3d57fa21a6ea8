use core::fmt;
use thiserror::Error;

pub type Result<T, E = ExtractorError> = core::result::Result<T, E>;

/// One rejected construction attempt, kept in try order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub variant: &'static str,
    pub reason: String,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.variant, self.reason)
    }
}

/// Render an attempt list as an indented report block.
pub fn format_attempts(attempts: &[Attempt]) -> String {
    let mut out = String::new();
    for attempt in attempts {
        out.push_str("\n  - ");
        out.push_str(&attempt.to_string());
    }
    out
}

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("field bag is not usable: {0}")]
    InvalidBag(String),
    #[error("no extractor variants are allowed for this entity kind")]
    EmptyAllowList,
    /// A variant matched the field shape but violated a domain invariant.
    /// Never retried against later variants.
    #[error("invalid `{variant}` extractor configuration: {reason}")]
    Semantic {
        variant: &'static str,
        reason: String,
    },
    /// Every allowed variant rejected the bag; `attempts` preserves try order.
    #[error("no extractor variant matched:{}", format_attempts(.attempts))]
    NoMatch { attempts: Vec<Attempt> },
}
