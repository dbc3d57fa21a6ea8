//! Whole-document resolution for one platform.

use std::collections::BTreeMap;

use extractor_spec::{Attempt, FieldBag};

use crate::descriptor::{Candidacy, DescriptorKind, EntityDescriptor};
use crate::error::{RegistryError, Result};
use crate::types::EntityKey;

/// One parsed platform configuration document, in declaration order.
pub type Document = Vec<(EntityKey, FieldBag)>;

/// A platform: an ordered registration of descriptor variants. Registration
/// validates each variant's structural contract before any document is seen.
#[derive(Debug, Clone)]
pub struct Platform {
    name: String,
    kinds: Vec<DescriptorKind>,
}

impl Platform {
    pub fn new(name: impl Into<String>, kinds: &[DescriptorKind]) -> Result<Self> {
        let name = name.into();
        if kinds.is_empty() {
            return Err(RegistryError::SchemaAuthoring {
                descriptor: name,
                reason: "no descriptor variants registered".to_string(),
            });
        }
        for kind in kinds {
            kind.identifier_field()?;
            if kind.allowed_extractors().is_empty() {
                return Err(RegistryError::SchemaAuthoring {
                    descriptor: kind.name().to_string(),
                    reason: "empty allowed-extractor list".to_string(),
                });
            }
        }
        Ok(Self {
            name,
            kinds: kinds.to_vec(),
        })
    }

    /// One platform per descriptor kind, named after it. The standard
    /// catalogue mirrors the per-platform module layout of the firmware
    /// component this registry feeds.
    pub fn standard() -> Result<Vec<Self>> {
        DescriptorKind::ALL
            .iter()
            .map(|kind| Self::new(kind.name(), std::slice::from_ref(kind)))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kinds(&self) -> &[DescriptorKind] {
        &self.kinds
    }

    /// Resolve every entry of `document` to its matching descriptor variant.
    ///
    /// Candidates are tried in registration order; the first variant that
    /// fully consumes the entry's bag wins. Failure of every candidate fails
    /// the whole document with the per-candidate reasons in try order; the
    /// resolver never emits a partial document.
    pub fn resolve_document(&self, document: &Document) -> Result<ResolvedPlatform> {
        if document.is_empty() {
            return Err(RegistryError::EmptyDocument {
                platform: self.name.clone(),
            });
        }

        let mut entities = BTreeMap::new();
        for (key, bag) in document {
            let mut attempts: Vec<Attempt> = Vec::new();
            let mut resolved = None;
            for kind in &self.kinds {
                match kind.try_build(key, bag) {
                    Ok(descriptor) => {
                        tracing::debug!(
                            platform = %self.name,
                            entity = %key,
                            variant = kind.name(),
                            "descriptor variant matched"
                        );
                        resolved = Some(descriptor);
                        break;
                    }
                    Err(Candidacy::Rejected(reason)) => {
                        attempts.push(Attempt {
                            variant: kind.name(),
                            reason,
                        });
                    }
                    Err(Candidacy::Fatal(err)) => return Err(err),
                }
            }
            match resolved {
                Some(descriptor) => {
                    entities.insert(key.clone(), descriptor);
                }
                None => {
                    return Err(RegistryError::NoMatchingDescriptor {
                        key: key.clone(),
                        attempts,
                    });
                }
            }
        }

        tracing::info!(
            platform = %self.name,
            entities = entities.len(),
            "platform document resolved"
        );
        Ok(ResolvedPlatform {
            platform: self.name.clone(),
            entities,
        })
    }
}

/// Immutable result of one document resolution pass: a lookup keyed by
/// entity identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlatform {
    pub platform: String,
    pub entities: BTreeMap<EntityKey, EntityDescriptor>,
}

impl ResolvedPlatform {
    pub fn get(&self, key: &EntityKey) -> Option<&EntityDescriptor> {
        self.entities.get(key)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &EntityDescriptor)> {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extractor_spec::ExtractorSpec;
    use serde_yaml::Mapping;

    fn document(yaml: &str) -> Document {
        let map: Mapping = serde_yaml::from_str(yaml).unwrap();
        map.iter()
            .map(|(key, bag)| {
                (
                    EntityKey::from_yaml(key).unwrap(),
                    FieldBag::from_mapping(bag.as_mapping().unwrap().clone()).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn standard_catalogue_registers_every_variant() {
        let platforms = Platform::standard().unwrap();
        assert_eq!(platforms.len(), DescriptorKind::ALL.len());
        assert!(platforms.iter().any(|p| p.name() == "sensor"));
    }

    #[test]
    fn resolves_a_sensor_document_keyed_by_identifier() {
        let platform = Platform::new("sensor", &[DescriptorKind::Sensor]).unwrap();
        let doc = document(
            "10:\n  name: Outlet temperature\n  byte: 10\n  multiplier: 0.5\n\
             x7:\n  name: Aux flow\n  byte: 7",
        );
        let resolved = platform.resolve_document(&doc).unwrap();
        assert_eq!(resolved.len(), 2);

        let outlet = resolved.get(&EntityKey::Index(10)).unwrap();
        assert_eq!(outlet.name(), "Outlet temperature");
        assert!(!outlet.is_extra());

        let aux = resolved.get(&EntityKey::Token("x7".to_string())).unwrap();
        assert!(aux.is_extra());
    }

    #[test]
    fn empty_document_is_invalid() {
        let platform = Platform::new("sensor", &[DescriptorKind::Sensor]).unwrap();
        let err = platform.resolve_document(&Vec::new()).unwrap_err();
        assert!(matches!(err, RegistryError::EmptyDocument { .. }));
    }

    #[test]
    fn unresolvable_entry_fails_the_whole_document_with_both_extractor_reasons() {
        // No `byte` or `decoder` field: both of the sensor platform's
        // allowed extractors must be cited in the failure.
        let platform = Platform::new("sensor", &[DescriptorKind::Sensor]).unwrap();
        let doc = document("10:\n  name: Pump\n  top: 10");
        let err = platform.resolve_document(&doc).unwrap_err();
        match err {
            RegistryError::NoMatchingDescriptor { key, attempts } => {
                assert_eq!(key, EntityKey::Index(10));
                assert_eq!(attempts.len(), 1);
                let reason = &attempts[0].reason;
                assert!(reason.contains("lambda"), "missing lambda reason: {reason}");
                assert!(reason.contains("float"), "missing float reason: {reason}");
            }
            other => panic!("expected NoMatchingDescriptor, got {other:?}"),
        }
    }

    #[test]
    fn semantic_error_aborts_the_document_without_aggregation() {
        let platform = Platform::new("select", &[DescriptorKind::Select]).unwrap();
        let doc = document(
            "6:\n  name: Zones\n  byte: 6\n  bit: 0\n  bit_width: 2\n  labels:\n    ? [1, 2]\n    : Both\n    3: One",
        );
        let err = platform.resolve_document(&doc).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Extractor(extractor_spec::ExtractorError::Semantic { .. })
        ));
    }

    #[test]
    fn resolving_twice_yields_identical_descriptors() {
        let platform = Platform::new("switch", &[DescriptorKind::Switch]).unwrap();
        let doc = document("4:\n  name: Force DHW\n  byte: 4\n  bit: 2");
        let a = platform.resolve_document(&doc).unwrap();
        let b = platform.resolve_document(&doc).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn registration_order_of_variants_decides_ties() {
        // A text-sensor bag with array labels matches string_array before
        // string_map; the registered kind order decides between descriptor
        // variants the same way.
        let platform = Platform::new(
            "mixed",
            &[DescriptorKind::TextSensor, DescriptorKind::BinarySensor],
        )
        .unwrap();
        let doc = document(
            "11:\n  name: Mode\n  byte: 11\n  bit: 0\n  bit_width: 2\n  labels: [Idle, Heat]",
        );
        let resolved = platform.resolve_document(&doc).unwrap();
        let desc = resolved.get(&EntityKey::Index(11)).unwrap();
        assert_eq!(desc.kind(), DescriptorKind::TextSensor);
        assert!(matches!(desc.extractor(), ExtractorSpec::StringArray(_)));
    }
}
