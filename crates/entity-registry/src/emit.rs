//! Emission seam to the downstream code generator.
//!
//! Walking a resolved platform against an owning hub produces the object
//! graph the generator consumes: per entity its schema fields, built
//! extractor, capability flags and registration records. No resolution
//! logic lives here.

use serde::Serialize;

use extractor_spec::ExtractorSpec;

use crate::error::{RegistryError, Result};
use crate::platform::ResolvedPlatform;
use crate::types::{Capabilities, EntityKey};

/// The owning hub component and its registration collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hub {
    pub id: String,
    /// Primary readable-entity bucket.
    pub entities: Vec<EntityKey>,
    /// Auxiliary bucket for entities flagged by the `x` identifier marker.
    pub extra_entities: Vec<EntityKey>,
    /// Writable entities parented to this hub.
    pub parented: Vec<EntityKey>,
}

impl Hub {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// One materialized entity handed to the code generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmittedEntity {
    pub key: EntityKey,
    pub platform: String,
    pub name: String,
    pub schema: serde_json::Value,
    pub extractor: ExtractorSpec,
    pub capabilities: Capabilities,
    /// Owning hub, set exactly once for writable entities.
    pub parent: Option<String>,
}

impl EmittedEntity {
    /// Declare the owning-parent relationship. A parent is bound once and
    /// never reassigned.
    pub fn bind_parent(&mut self, hub_id: &str) -> Result<()> {
        if let Some(parent) = &self.parent {
            return Err(RegistryError::ParentRebound {
                entity: format!("{}/{}", self.platform, self.key),
                parent: parent.clone(),
            });
        }
        self.parent = Some(hub_id.to_string());
        Ok(())
    }
}

/// Materialize every resolved entity and register it with `hub`:
/// readable entities land in the primary or extra collection per their
/// `extra` flag, writable entities record the parent-ownership relation.
pub fn emit_platform(resolved: &ResolvedPlatform, hub: &mut Hub) -> Result<Vec<EmittedEntity>> {
    let mut out = Vec::with_capacity(resolved.len());
    for (key, descriptor) in resolved.iter() {
        let mut entity = EmittedEntity {
            key: key.clone(),
            platform: descriptor.kind().name().to_string(),
            name: descriptor.name().to_string(),
            schema: descriptor.schema(),
            extractor: descriptor.extractor().clone(),
            capabilities: descriptor.capabilities(),
            parent: None,
        };

        if entity.capabilities.writable {
            entity.bind_parent(&hub.id)?;
            hub.parented.push(key.clone());
        }
        if entity.capabilities.readable {
            if descriptor.is_extra() {
                hub.extra_entities.push(key.clone());
            } else {
                hub.entities.push(key.clone());
            }
        }
        out.push(entity);
    }
    tracing::debug!(
        platform = %resolved.platform,
        emitted = out.len(),
        "emission graph materialized"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorKind;
    use crate::platform::{Document, Platform};
    use extractor_spec::FieldBag;
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

    fn resolve(kind: DescriptorKind, yaml: &str) -> ResolvedPlatform {
        Platform::new(kind.name(), &[kind])
            .unwrap()
            .resolve_document(&document(yaml))
            .unwrap()
    }

    #[test]
    fn readable_entities_bucket_by_the_extra_flag() {
        let resolved = resolve(
            DescriptorKind::Sensor,
            "20:\n  name: Outlet\n  byte: 20\nx7:\n  name: Aux\n  byte: 7",
        );
        let mut hub = Hub::new("heatpump");
        let emitted = emit_platform(&resolved, &mut hub).unwrap();

        assert_eq!(emitted.len(), 2);
        assert_eq!(hub.entities, vec![EntityKey::Index(20)]);
        assert_eq!(hub.extra_entities, vec![EntityKey::Token("x7".to_string())]);
        assert!(hub.parented.is_empty());
        assert!(emitted.iter().all(|e| e.parent.is_none()));
    }

    #[test]
    fn writable_entities_bind_the_hub_as_parent_once() {
        let resolved = resolve(DescriptorKind::Switch, "4:\n  name: Force DHW\n  byte: 4\n  bit: 2");
        let mut hub = Hub::new("heatpump");
        let mut emitted = emit_platform(&resolved, &mut hub).unwrap();

        let entity = &mut emitted[0];
        assert_eq!(entity.parent.as_deref(), Some("heatpump"));
        assert_eq!(hub.parented, vec![EntityKey::Index(4)]);
        // Switch is also readable: it must land in the primary bucket too.
        assert_eq!(hub.entities, vec![EntityKey::Index(4)]);

        let err = entity.bind_parent("other-hub").unwrap_err();
        assert!(matches!(err, RegistryError::ParentRebound { .. }));
        assert_eq!(entity.parent.as_deref(), Some("heatpump"));
    }

    #[test]
    fn write_only_entities_register_nothing_readable() {
        let resolved = resolve(DescriptorKind::Button, "9:\n  name: Reset\n  byte: 9\n  bit: 0");
        let mut hub = Hub::new("heatpump");
        emit_platform(&resolved, &mut hub).unwrap();
        assert!(hub.entities.is_empty());
        assert!(hub.extra_entities.is_empty());
        assert_eq!(hub.parented, vec![EntityKey::Index(9)]);
    }

    #[test]
    fn emitted_entity_carries_schema_and_extractor() {
        let resolved = resolve(
            DescriptorKind::Select,
            "6:\n  name: Mode\n  byte: 6\n  bit: 4\n  bit_width: 2\n  labels: [Off, Heat]",
        );
        let mut hub = Hub::new("heatpump");
        let emitted = emit_platform(&resolved, &mut hub).unwrap();
        let entity = &emitted[0];
        assert_eq!(entity.platform, "select");
        assert_eq!(entity.schema["options"], serde_json::json!(["Off", "Heat"]));
        assert!(matches!(entity.extractor, ExtractorSpec::StringArray(_)));
    }
}
