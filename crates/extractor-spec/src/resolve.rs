//! Trial-construction resolution over an ordered allowed-variant list.

use crate::bag::FieldBag;
use crate::error::{Attempt, ExtractorError, Result};
use crate::types::ExtractorKind;
use crate::variants::{BuildRejection, ExtractorSpec};

/// Resolve the first extractor variant in `allowed` that constructs from
/// `bag`, consuming its declared fields.
///
/// Variants are tried strictly in list order and the loop stops at the first
/// success, so when two variants could match the same field subset the
/// earlier one always wins. That is deliberate policy, not a detected
/// ambiguity; reordering the allowed list can change the outcome for an
/// unchanged bag.
///
/// On success the built spec and the untouched remainder of the bag are
/// returned. If every variant rejects the bag the error reports each
/// attempt's reason in try order. A semantic configuration error inside one
/// variant aborts immediately instead of being retried.
pub fn resolve_extractor(
    allowed: &[ExtractorKind],
    bag: FieldBag,
) -> Result<(ExtractorSpec, FieldBag)> {
    if allowed.is_empty() {
        return Err(ExtractorError::EmptyAllowList);
    }

    let mut attempts = Vec::with_capacity(allowed.len());
    for kind in allowed {
        let (taken, rest) = bag.split(kind.fields());
        match ExtractorSpec::try_build(*kind, taken) {
            Ok(spec) => {
                tracing::debug!(variant = kind.name(), "extractor variant matched");
                return Ok((spec, rest));
            }
            Err(BuildRejection::Mismatch(reason)) => {
                tracing::debug!(variant = kind.name(), %reason, "extractor variant rejected");
                attempts.push(Attempt {
                    variant: kind.name(),
                    reason,
                });
            }
            Err(BuildRejection::Semantic(reason)) => {
                return Err(ExtractorError::Semantic {
                    variant: kind.name(),
                    reason,
                });
            }
        }
    }

    Err(ExtractorError::NoMatch { attempts })
}
