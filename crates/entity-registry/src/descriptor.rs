//! The closed set of entity descriptor variants.
//!
//! Each variant declares its identifier field, the ordered extractor
//! variants it accepts, and its own schema fields. Construction is trial
//! based: the platform resolver injects the document key, the extractor
//! resolver consumes its fields, and the remaining bag must deserialize into
//! the variant's schema with nothing left over.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_yaml::Value;

use extractor_spec::{resolve_extractor, ExtractorError, ExtractorKind, ExtractorSpec, FieldBag, ValueType};

use crate::defaults::{default_state_class, default_unit};
use crate::error::{RegistryError, Result};
use crate::types::{Capabilities, EntityKey, IdField};

/// Outcome of one descriptor candidate that did not fully construct.
#[derive(Debug)]
pub(crate) enum Candidacy {
    /// This candidate rejected the entry; the resolver tries the next one.
    Rejected(String),
    /// Authoring bug surfaced mid-construction; aborts the whole document.
    Fatal(RegistryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    BinarySensor,
    Button,
    Number,
    Select,
    Sensor,
    Switch,
    TextSensor,
}

impl DescriptorKind {
    pub const ALL: [DescriptorKind; 7] = [
        DescriptorKind::BinarySensor,
        DescriptorKind::Button,
        DescriptorKind::Number,
        DescriptorKind::Select,
        DescriptorKind::Sensor,
        DescriptorKind::Switch,
        DescriptorKind::TextSensor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DescriptorKind::BinarySensor => "binary_sensor",
            DescriptorKind::Button => "button",
            DescriptorKind::Number => "number",
            DescriptorKind::Select => "select",
            DescriptorKind::Sensor => "sensor",
            DescriptorKind::Switch => "switch",
            DescriptorKind::TextSensor => "text_sensor",
        }
    }

    /// Schema field names this variant consumes after extractor resolution.
    /// Must stay in sync with the typed field structs below; the identifier
    /// contract is derived from this declaration.
    pub fn schema_fields(&self) -> &'static [&'static str] {
        match self {
            DescriptorKind::BinarySensor => &["name", "top", "device_class"],
            DescriptorKind::Button => &["name", "set"],
            DescriptorKind::Number => &[
                "name",
                "set",
                "min",
                "max",
                "device_class",
                "entity_category",
            ],
            DescriptorKind::Select => &["name", "set", "icon"],
            DescriptorKind::Sensor => &[
                "name",
                "top",
                "unit_of_measurement",
                "device_class",
                "icon",
                "state_class",
                "accuracy_decimals",
                "extra",
            ],
            DescriptorKind::Switch => &["name", "set"],
            DescriptorKind::TextSensor => &["name", "top", "icon"],
        }
    }

    /// Extractor variants this entity kind accepts, in try order.
    pub fn allowed_extractors(&self) -> &'static [ExtractorKind] {
        match self {
            DescriptorKind::BinarySensor | DescriptorKind::Button | DescriptorKind::Switch => {
                &[ExtractorKind::Binary]
            }
            DescriptorKind::Number => &[ExtractorKind::Float],
            DescriptorKind::Select => &[ExtractorKind::StringArray, ExtractorKind::StringMap],
            DescriptorKind::Sensor => &[
                ExtractorKind::Lambda(ValueType::Float),
                ExtractorKind::Float,
            ],
            DescriptorKind::TextSensor => &[
                ExtractorKind::Lambda(ValueType::Text),
                ExtractorKind::StringArray,
                ExtractorKind::StringMap,
            ],
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            DescriptorKind::BinarySensor | DescriptorKind::Sensor | DescriptorKind::TextSensor => {
                Capabilities::READABLE
            }
            DescriptorKind::Button => Capabilities::WRITABLE,
            DescriptorKind::Number | DescriptorKind::Select | DescriptorKind::Switch => {
                Capabilities::BOTH
            }
        }
    }

    /// Resolve this variant's identifier field per the structural contract.
    pub fn identifier_field(&self) -> Result<IdField> {
        identifier_field(self.name(), self.schema_fields())
    }

    /// Attempt to construct this variant from a document entry.
    pub(crate) fn try_build(
        &self,
        key: &EntityKey,
        bag: &FieldBag,
    ) -> core::result::Result<EntityDescriptor, Candidacy> {
        let (extractor, rest) = match resolve_extractor(self.allowed_extractors(), bag.clone()) {
            Ok(found) => found,
            Err(ExtractorError::NoMatch { attempts }) => {
                return Err(Candidacy::Rejected(format!(
                    "no extractor variant matched:{}",
                    extractor_spec::format_attempts(&attempts)
                )));
            }
            Err(fatal) => return Err(Candidacy::Fatal(fatal.into())),
        };

        let id_field = self.identifier_field().map_err(Candidacy::Fatal)?;
        let mut rest = rest;
        // The identifier value comes from the document key alone. A bag that
        // also spells it out duplicates the identifier and rejects here
        // instead of having one of the two values silently win.
        if rest.contains(id_field.name()) {
            return Err(Candidacy::Rejected(format!(
                "field `{}` duplicates the document key",
                id_field.name()
            )));
        }
        rest.insert(id_field.name(), key.to_yaml());
        if key.is_extra() {
            // Only variants whose schema carries an `extra` field can absorb
            // the marker; everything else rejects x-keys here.
            rest.insert("extra", Value::Bool(true));
        }

        build_descriptor(*self, rest, extractor)
    }
}

impl core::fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Identifier-field contract check: exactly one of `set`/`top` among the
/// declared schema fields. Independent of any configuration document.
pub(crate) fn identifier_field(descriptor: &str, fields: &[&str]) -> Result<IdField> {
    let set = fields.contains(&"set");
    let top = fields.contains(&"top");
    match (set, top) {
        (true, false) => Ok(IdField::Set),
        (false, true) => Ok(IdField::Top),
        (true, true) => Err(RegistryError::SchemaAuthoring {
            descriptor: descriptor.to_string(),
            reason: "declares both `set` and `top` identifier fields".to_string(),
        }),
        (false, false) => Err(RegistryError::SchemaAuthoring {
            descriptor: descriptor.to_string(),
            reason: "declares no identifier field (`set` or `top`)".to_string(),
        }),
    }
}

fn build_descriptor(
    kind: DescriptorKind,
    fields: FieldBag,
    extractor: ExtractorSpec,
) -> core::result::Result<EntityDescriptor, Candidacy> {
    let value = fields.into_value();
    match kind {
        DescriptorKind::BinarySensor => {
            #[derive(Deserialize)]
            #[serde(deny_unknown_fields)]
            struct Fields {
                name: String,
                top: EntityKey,
                #[serde(default)]
                device_class: Option<String>,
            }
            let f: Fields = from_fields(value)?;
            Ok(EntityDescriptor::BinarySensor(BinarySensorDescriptor {
                name: f.name,
                top: f.top,
                device_class: f.device_class,
                extractor,
            }))
        }
        DescriptorKind::Button => {
            #[derive(Deserialize)]
            #[serde(deny_unknown_fields)]
            struct Fields {
                name: String,
                set: EntityKey,
            }
            let f: Fields = from_fields(value)?;
            Ok(EntityDescriptor::Button(ButtonDescriptor {
                name: f.name,
                set: f.set,
                extractor,
            }))
        }
        DescriptorKind::Number => {
            #[derive(Deserialize)]
            #[serde(deny_unknown_fields)]
            struct Fields {
                name: String,
                set: EntityKey,
                min: f64,
                max: f64,
                #[serde(default)]
                device_class: Option<String>,
                #[serde(default)]
                entity_category: Option<String>,
            }
            let f: Fields = from_fields(value)?;
            if f.min > f.max {
                return Err(Candidacy::Fatal(RegistryError::Semantic {
                    descriptor: "number",
                    reason: format!("min {} exceeds max {}", f.min, f.max),
                }));
            }
            Ok(EntityDescriptor::Number(NumberDescriptor {
                name: f.name,
                set: f.set,
                min: f.min,
                max: f.max,
                device_class: f.device_class,
                entity_category: f.entity_category,
                extractor,
            }))
        }
        DescriptorKind::Select => {
            #[derive(Deserialize)]
            #[serde(deny_unknown_fields)]
            struct Fields {
                name: String,
                set: EntityKey,
                #[serde(default)]
                icon: Option<String>,
            }
            let f: Fields = from_fields(value)?;
            Ok(EntityDescriptor::Select(SelectDescriptor {
                name: f.name,
                set: f.set,
                icon: f.icon,
                extractor,
            }))
        }
        DescriptorKind::Sensor => {
            #[derive(Deserialize)]
            #[serde(deny_unknown_fields)]
            struct Fields {
                name: String,
                top: EntityKey,
                #[serde(default)]
                unit_of_measurement: Option<String>,
                #[serde(default)]
                device_class: Option<String>,
                #[serde(default)]
                icon: Option<String>,
                #[serde(default)]
                state_class: Option<String>,
                #[serde(default)]
                accuracy_decimals: Option<u8>,
                #[serde(default)]
                extra: bool,
            }
            let f: Fields = from_fields(value)?;
            Ok(EntityDescriptor::Sensor(SensorDescriptor {
                name: f.name,
                top: f.top,
                unit_of_measurement: f.unit_of_measurement,
                device_class: f.device_class,
                icon: f.icon,
                state_class: f.state_class,
                accuracy_decimals: f.accuracy_decimals,
                extra: f.extra,
                extractor,
            }))
        }
        DescriptorKind::Switch => {
            #[derive(Deserialize)]
            #[serde(deny_unknown_fields)]
            struct Fields {
                name: String,
                set: EntityKey,
            }
            let f: Fields = from_fields(value)?;
            Ok(EntityDescriptor::Switch(SwitchDescriptor {
                name: f.name,
                set: f.set,
                extractor,
            }))
        }
        DescriptorKind::TextSensor => {
            #[derive(Deserialize)]
            #[serde(deny_unknown_fields)]
            struct Fields {
                name: String,
                top: EntityKey,
                #[serde(default)]
                icon: Option<String>,
            }
            let f: Fields = from_fields(value)?;
            Ok(EntityDescriptor::TextSensor(TextSensorDescriptor {
                name: f.name,
                top: f.top,
                icon: f.icon,
                extractor,
            }))
        }
    }
}

fn from_fields<T: serde::de::DeserializeOwned>(
    value: Value,
) -> core::result::Result<T, Candidacy> {
    serde_yaml::from_value(value).map_err(|err| Candidacy::Rejected(err.to_string()))
}

/// Read-only binary status flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinarySensorDescriptor {
    pub name: String,
    pub top: EntityKey,
    pub device_class: Option<String>,
    pub extractor: ExtractorSpec,
}

/// Momentary command: pressing toggles the addressed bit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonDescriptor {
    pub name: String,
    pub set: EntityKey,
    pub extractor: ExtractorSpec,
}

/// Writable numeric setpoint with linear normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberDescriptor {
    pub name: String,
    pub set: EntityKey,
    pub min: f64,
    pub max: f64,
    pub device_class: Option<String>,
    pub entity_category: Option<String>,
    pub extractor: ExtractorSpec,
}

/// Writable enumerated mode/option control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectDescriptor {
    pub name: String,
    pub set: EntityKey,
    pub icon: Option<String>,
    pub extractor: ExtractorSpec,
}

/// Read-only numeric sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorDescriptor {
    pub name: String,
    pub top: EntityKey,
    pub unit_of_measurement: Option<String>,
    pub device_class: Option<String>,
    pub icon: Option<String>,
    pub state_class: Option<String>,
    pub accuracy_decimals: Option<u8>,
    pub extra: bool,
    pub extractor: ExtractorSpec,
}

impl SensorDescriptor {
    /// Decimal places shown for the decoded value. Unless set explicitly,
    /// derived from the float extractor's multiplier: a multiplier of 0.01
    /// yields two decimals.
    pub fn display_accuracy_decimals(&self) -> u8 {
        if let Some(decimals) = self.accuracy_decimals {
            return decimals;
        }
        let multiplier = self.extractor.multiplier().unwrap_or(1.0);
        if multiplier >= 1.0 {
            0
        } else {
            (1.0 / multiplier).log10().ceil() as u8
        }
    }

    pub fn display_unit(&self) -> Option<&str> {
        self.unit_of_measurement.as_deref().or_else(|| {
            self.device_class.as_deref().and_then(default_unit)
        })
    }

    pub fn display_state_class(&self) -> Option<&str> {
        self.state_class.as_deref().or_else(|| {
            self.device_class.as_deref().and_then(default_state_class)
        })
    }
}

/// Writable on/off control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchDescriptor {
    pub name: String,
    pub set: EntityKey,
    pub extractor: ExtractorSpec,
}

/// Read-only enumerated/text status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSensorDescriptor {
    pub name: String,
    pub top: EntityKey,
    pub icon: Option<String>,
    pub extractor: ExtractorSpec,
}

/// A fully resolved, immutable entity descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum EntityDescriptor {
    BinarySensor(BinarySensorDescriptor),
    Button(ButtonDescriptor),
    Number(NumberDescriptor),
    Select(SelectDescriptor),
    Sensor(SensorDescriptor),
    Switch(SwitchDescriptor),
    TextSensor(TextSensorDescriptor),
}

impl EntityDescriptor {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            EntityDescriptor::BinarySensor(_) => DescriptorKind::BinarySensor,
            EntityDescriptor::Button(_) => DescriptorKind::Button,
            EntityDescriptor::Number(_) => DescriptorKind::Number,
            EntityDescriptor::Select(_) => DescriptorKind::Select,
            EntityDescriptor::Sensor(_) => DescriptorKind::Sensor,
            EntityDescriptor::Switch(_) => DescriptorKind::Switch,
            EntityDescriptor::TextSensor(_) => DescriptorKind::TextSensor,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EntityDescriptor::BinarySensor(d) => &d.name,
            EntityDescriptor::Button(d) => &d.name,
            EntityDescriptor::Number(d) => &d.name,
            EntityDescriptor::Select(d) => &d.name,
            EntityDescriptor::Sensor(d) => &d.name,
            EntityDescriptor::Switch(d) => &d.name,
            EntityDescriptor::TextSensor(d) => &d.name,
        }
    }

    /// Identifier value: the byte/bit address or key used for configuration
    /// lookup and as the hardware address.
    pub fn id_value(&self) -> &EntityKey {
        match self {
            EntityDescriptor::BinarySensor(d) => &d.top,
            EntityDescriptor::Button(d) => &d.set,
            EntityDescriptor::Number(d) => &d.set,
            EntityDescriptor::Select(d) => &d.set,
            EntityDescriptor::Sensor(d) => &d.top,
            EntityDescriptor::Switch(d) => &d.set,
            EntityDescriptor::TextSensor(d) => &d.top,
        }
    }

    pub fn extractor(&self) -> &ExtractorSpec {
        match self {
            EntityDescriptor::BinarySensor(d) => &d.extractor,
            EntityDescriptor::Button(d) => &d.extractor,
            EntityDescriptor::Number(d) => &d.extractor,
            EntityDescriptor::Select(d) => &d.extractor,
            EntityDescriptor::Sensor(d) => &d.extractor,
            EntityDescriptor::Switch(d) => &d.extractor,
            EntityDescriptor::TextSensor(d) => &d.extractor,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind().capabilities()
    }

    pub fn is_extra(&self) -> bool {
        matches!(self, EntityDescriptor::Sensor(d) if d.extra)
    }

    /// Entity-specific schema handed to the emission collaborator. Unset
    /// optional fields are omitted; sensor presentation defaults are applied.
    pub fn schema(&self) -> serde_json::Value {
        let mut schema = match self {
            EntityDescriptor::BinarySensor(d) => json_object(&[
                ("name", Some(json!(d.name))),
                ("device_class", d.device_class.as_deref().map(|v| json!(v))),
            ]),
            EntityDescriptor::Button(d) => json_object(&[("name", Some(json!(d.name)))]),
            EntityDescriptor::Number(d) => json_object(&[
                ("name", Some(json!(d.name))),
                ("min", Some(json!(d.min))),
                ("max", Some(json!(d.max))),
                ("step", Some(json!(1))),
                ("device_class", d.device_class.as_deref().map(|v| json!(v))),
                (
                    "entity_category",
                    d.entity_category.as_deref().map(|v| json!(v)),
                ),
                (
                    "unit_of_measurement",
                    d.device_class
                        .as_deref()
                        .and_then(default_unit)
                        .map(|v| json!(v)),
                ),
            ]),
            EntityDescriptor::Select(d) => json_object(&[
                ("name", Some(json!(d.name))),
                ("icon", d.icon.as_deref().map(|v| json!(v))),
            ]),
            EntityDescriptor::Sensor(d) => json_object(&[
                ("name", Some(json!(d.name))),
                ("unit_of_measurement", d.display_unit().map(|v| json!(v))),
                ("device_class", d.device_class.as_deref().map(|v| json!(v))),
                ("icon", d.icon.as_deref().map(|v| json!(v))),
                ("state_class", d.display_state_class().map(|v| json!(v))),
                (
                    "accuracy_decimals",
                    Some(json!(d.display_accuracy_decimals())),
                ),
            ]),
            EntityDescriptor::Switch(d) => json_object(&[("name", Some(json!(d.name)))]),
            EntityDescriptor::TextSensor(d) => json_object(&[
                ("name", Some(json!(d.name))),
                ("icon", d.icon.as_deref().map(|v| json!(v))),
            ]),
        };

        // Enumerated entities present their label table as the option list.
        if let Some(labels) = self.extractor().labels() {
            if let serde_json::Value::Object(map) = &mut schema {
                map.insert("options".to_string(), json!(labels));
            }
        }
        schema
    }
}

fn json_object(entries: &[(&str, Option<serde_json::Value>)]) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (key, value) in entries {
        if let Some(value) = value {
            map.insert((*key).to_string(), value.clone());
        }
    }
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Mapping;

    fn bag(yaml: &str) -> FieldBag {
        let map: Mapping = serde_yaml::from_str(yaml).unwrap();
        FieldBag::from_mapping(map).unwrap()
    }

    #[test]
    fn every_builtin_kind_satisfies_the_identifier_contract() {
        for kind in DescriptorKind::ALL {
            let id = kind.identifier_field().unwrap();
            assert!(kind.schema_fields().contains(&id.name()));
            assert!(!kind.allowed_extractors().is_empty());
        }
    }

    #[test]
    fn identifier_contract_rejects_both_candidates() {
        let err = identifier_field("broken", &["name", "set", "top"]).unwrap_err();
        assert!(matches!(err, RegistryError::SchemaAuthoring { .. }));
    }

    #[test]
    fn identifier_contract_rejects_zero_candidates() {
        let err = identifier_field("broken", &["name"]).unwrap_err();
        assert!(matches!(err, RegistryError::SchemaAuthoring { .. }));
    }

    #[test]
    fn binary_sensor_builds_and_consumes_every_field() {
        let desc = DescriptorKind::BinarySensor
            .try_build(
                &EntityKey::Index(3),
                &bag("name: Defrost\nbyte: 3\nbit: 5\ndevice_class: running"),
            )
            .unwrap();
        assert_eq!(desc.kind(), DescriptorKind::BinarySensor);
        assert_eq!(desc.name(), "Defrost");
        assert_eq!(desc.id_value(), &EntityKey::Index(3));
        assert!(matches!(desc.extractor(), ExtractorSpec::Binary(_)));
    }

    #[test]
    fn leftover_fields_reject_the_candidate() {
        // `bogus` is claimed by neither the extractor nor the schema.
        let err = DescriptorKind::BinarySensor
            .try_build(
                &EntityKey::Index(3),
                &bag("name: Defrost\nbyte: 3\nbit: 5\nbogus: 1"),
            )
            .unwrap_err();
        match err {
            Candidacy::Rejected(reason) => assert!(reason.contains("bogus")),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn identifier_field_in_the_bag_rejects_the_candidate() {
        // The key already names the identifier; a bag-level `set` would
        // either agree redundantly or conflict, so neither is accepted.
        let err = DescriptorKind::Switch
            .try_build(
                &EntityKey::Index(4),
                &bag("name: Force DHW\nbyte: 4\nbit: 2\nset: 9"),
            )
            .unwrap_err();
        match err {
            Candidacy::Rejected(reason) => assert!(reason.contains("set")),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn extra_marker_threads_into_sensor_descriptors() {
        let with_marker = DescriptorKind::Sensor
            .try_build(&EntityKey::Token("x7".to_string()), &bag("name: Aux\nbyte: 7"))
            .unwrap();
        assert!(with_marker.is_extra());

        let without = DescriptorKind::Sensor
            .try_build(&EntityKey::Index(7), &bag("name: Aux\nbyte: 7"))
            .unwrap();
        assert!(!without.is_extra());
    }

    #[test]
    fn extra_marker_rejects_kinds_without_an_extra_field() {
        let err = DescriptorKind::Switch
            .try_build(
                &EntityKey::Token("x4".to_string()),
                &bag("name: Force DHW\nbyte: 4\nbit: 2"),
            )
            .unwrap_err();
        assert!(matches!(err, Candidacy::Rejected(_)));
    }

    #[test]
    fn number_requires_min_and_max() {
        let err = DescriptorKind::Number
            .try_build(&EntityKey::Index(38), &bag("name: Target\nbyte: 38"))
            .unwrap_err();
        assert!(matches!(err, Candidacy::Rejected(_)));
    }

    #[test]
    fn inverted_number_range_is_fatal() {
        let err = DescriptorKind::Number
            .try_build(
                &EntityKey::Index(38),
                &bag("name: Target\nbyte: 38\nmin: 60\nmax: 20"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Candidacy::Fatal(RegistryError::Semantic { descriptor: "number", .. })
        ));
    }

    #[test]
    fn sensor_prefers_lambda_over_float_in_declared_order() {
        let desc = DescriptorKind::Sensor
            .try_build(
                &EntityKey::Index(10),
                &bag("name: COP\ndecoder: \"data_10 / 10.0\""),
            )
            .unwrap();
        match desc.extractor() {
            ExtractorSpec::Lambda(spec) => assert_eq!(spec.value_type, ValueType::Float),
            other => panic!("expected lambda extractor, got {other:?}"),
        }
    }

    #[test]
    fn sensor_schema_applies_derived_defaults() {
        let desc = DescriptorKind::Sensor
            .try_build(
                &EntityKey::Index(20),
                &bag("name: Outlet\nbyte: 20\nmultiplier: 0.5\ndevice_class: temperature"),
            )
            .unwrap();
        let schema = desc.schema();
        assert_eq!(schema["unit_of_measurement"], json!("°C"));
        assert_eq!(schema["state_class"], json!("measurement"));
        assert_eq!(schema["accuracy_decimals"], json!(1));
    }

    #[test]
    fn explicit_sensor_fields_override_derived_defaults() {
        let desc = DescriptorKind::Sensor
            .try_build(
                &EntityKey::Index(20),
                &bag(
                    "name: Outlet\nbyte: 20\ndevice_class: temperature\nunit_of_measurement: K\naccuracy_decimals: 3",
                ),
            )
            .unwrap();
        let schema = desc.schema();
        assert_eq!(schema["unit_of_measurement"], json!("K"));
        assert_eq!(schema["accuracy_decimals"], json!(3));
    }

    #[test]
    fn select_schema_lists_label_options_in_order() {
        let desc = DescriptorKind::Select
            .try_build(
                &EntityKey::Index(6),
                &bag("name: Mode\nbyte: 6\nbit: 4\nbit_width: 2\nlabels: [Off, Heat, Cool]"),
            )
            .unwrap();
        assert_eq!(desc.schema()["options"], json!(["Off", "Heat", "Cool"]));
        assert_eq!(desc.capabilities(), Capabilities::BOTH);
    }

    #[test]
    fn capabilities_follow_the_variant_table() {
        assert_eq!(
            DescriptorKind::Sensor.capabilities(),
            Capabilities::READABLE
        );
        assert_eq!(DescriptorKind::Button.capabilities(), Capabilities::WRITABLE);
        assert_eq!(DescriptorKind::Switch.capabilities(), Capabilities::BOTH);
    }
}
