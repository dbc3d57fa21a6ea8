//! Platform document loading from YAML files.

use anyhow::{bail, Context};
use extractor_spec::FieldBag;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::platform::{Document, Platform};
use crate::types::EntityKey;

/// Load one platform document: a YAML mapping from entity identifier to
/// property bag. Declaration order is preserved.
pub fn load_document_file(path: impl AsRef<Path>) -> anyhow::Result<Document> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading document: {}", path.display()))?;
    let val: Value =
        serde_yaml::from_str(&raw).with_context(|| format!("parsing yaml: {}", path.display()))?;
    let Some(map) = val.as_mapping() else {
        bail!(
            "document must be a mapping of entity identifiers: {}",
            path.display()
        );
    };

    let mut document = Document::with_capacity(map.len());
    for (key, bag) in map {
        let key = EntityKey::from_yaml(key).with_context(|| {
            format!("entity identifier must be a non-negative integer or string, got `{key:?}`")
        })?;
        let Some(fields) = bag.as_mapping() else {
            bail!("entity `{key}` must map to a property bag");
        };
        let bag = FieldBag::from_mapping(fields.clone())
            .with_context(|| format!("entity `{key}`"))?;
        document.push((key, bag));
    }
    Ok(document)
}

/// Load a directory of platform documents, `<platform>.yaml` per platform,
/// paired with the matching standard platform. Files are visited in sorted
/// order.
pub fn load_platform_dir(dir: impl AsRef<Path>) -> anyhow::Result<Vec<(Platform, Document)>> {
    let platforms = Platform::standard()?;

    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        if let Some(ext) = path.extension() {
            if ext == "yml" || ext == "yaml" {
                entries.push(path);
            }
        }
    }
    entries.sort();

    let mut out = Vec::with_capacity(entries.len());
    for path in entries {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            bail!("unreadable file name: {}", path.display());
        };
        let Some(platform) = platforms.iter().find(|p| p.name() == stem) else {
            bail!("no platform named `{stem}`: {}", path.display());
        };
        let document = load_document_file(&path)?;
        tracing::info!(platform = stem, entries = document.len(), "document loaded");
        out.push((platform.clone(), document));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("entity-registry-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_a_document_preserving_declaration_order() {
        let dir = temp_dir("order");
        let path = write_file(
            &dir,
            "sensor.yaml",
            "20:\n  name: Outlet\n  byte: 20\nx7:\n  name: Aux\n  byte: 7\n",
        );
        let doc = load_document_file(&path).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc[0].0, EntityKey::Index(20));
        assert_eq!(doc[1].0, EntityKey::Token("x7".to_string()));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_non_mapping_documents() {
        let dir = temp_dir("shape");
        let path = write_file(&dir, "sensor.yaml", "- 1\n- 2\n");
        assert!(load_document_file(&path).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn directory_loader_pairs_files_with_platforms() {
        let dir = temp_dir("dir");
        write_file(&dir, "switch.yaml", "4:\n  name: Force DHW\n  byte: 4\n  bit: 2\n");
        write_file(&dir, "sensor.yaml", "20:\n  name: Outlet\n  byte: 20\n");
        let loaded = load_platform_dir(&dir).unwrap();
        let names: Vec<_> = loaded.iter().map(|(p, _)| p.name().to_string()).collect();
        assert_eq!(names, vec!["sensor", "switch"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unknown_platform_file_is_an_error() {
        let dir = temp_dir("unknown");
        write_file(&dir, "thermostat.yaml", "1:\n  name: T\n  byte: 1\n");
        assert!(load_platform_dir(&dir).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
