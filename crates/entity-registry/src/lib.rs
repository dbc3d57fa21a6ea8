//! entity-registry: YAML-driven registry of heat pump entity descriptors
//!
//! Loads per-platform configuration documents (entity identifier -> property
//! bag), resolves every entry to the single descriptor variant that can
//! legally construct from it, and materializes the emission object graph the
//! downstream code generator consumes. Transport wiring and generated
//! firmware glue live outside this crate.

mod types;
pub use types::{Capabilities, EntityKey, IdField, EXTRA_MARKER};

mod error;
pub use error::{RegistryError, Result};

mod defaults;
pub use defaults::{default_state_class, default_unit};

mod descriptor;
pub use descriptor::{
    BinarySensorDescriptor, ButtonDescriptor, DescriptorKind, EntityDescriptor, NumberDescriptor,
    SelectDescriptor, SensorDescriptor, SwitchDescriptor, TextSensorDescriptor,
};

mod platform;
pub use platform::{Document, Platform, ResolvedPlatform};

mod loader;
pub use loader::{load_document_file, load_platform_dir};

mod emit;
pub use emit::{emit_platform, EmittedEntity, Hub};
