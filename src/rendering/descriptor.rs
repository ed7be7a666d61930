// Sat Oct 17 2026 - Alex

use crate::rendering::{RendererFactory, RenderingError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_FACTORY: &str = "default";

#[derive(Clone)]
pub enum FactoryKind {
    Default,
    Custom(Arc<dyn RendererFactory>),
}

impl fmt::Debug for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "Default"),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderingDescriptor {
    pub id: String,
    pub display_name: String,
    pub factory: FactoryKind,
    /// Views the rendering may appear in. Empty means any view.
    pub supported_view_ids: Vec<String>,
}

impl RenderingDescriptor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            factory: FactoryKind::Default,
            supported_view_ids: Vec::new(),
        }
    }

    pub fn with_factory(mut self, factory: Arc<dyn RendererFactory>) -> Self {
        self.factory = FactoryKind::Custom(factory);
        self
    }

    pub fn with_views<I, S>(mut self, views: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_view_ids = views.into_iter().map(Into::into).collect();
        self
    }

    pub fn supports_view(&self, view_id: &str) -> bool {
        self.supported_view_ids.is_empty() || self.supported_view_ids.iter().any(|v| v == view_id)
    }
}

pub trait DescriptorSource {
    fn descriptors(&self) -> Result<Vec<RenderingDescriptor>, RenderingError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub name: String,
    #[serde(default = "default_factory_name")]
    pub factory: String,
    #[serde(default)]
    pub views: Vec<String>,
}

fn default_factory_name() -> String {
    DEFAULT_FACTORY.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub renderings: Vec<ManifestEntry>,
}

/// Descriptors read from a JSON manifest. Factory names other than
/// `"default"` must be provided with [`ManifestSource::with_factory`].
pub struct ManifestSource {
    manifest: Manifest,
    factories: HashMap<String, Arc<dyn RendererFactory>>,
}

impl ManifestSource {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            factories: HashMap::new(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, RenderingError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderingError> {
        let text = fs::read_to_string(path.as_ref()).map_err(crate::memory::MemoryError::from)?;
        log::debug!("Loaded rendering manifest from {}", path.as_ref().display());
        Self::from_json(&text)
    }

    pub fn with_factory(mut self, name: impl Into<String>, factory: Arc<dyn RendererFactory>) -> Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    fn resolve(&self, entry: &ManifestEntry) -> Result<FactoryKind, RenderingError> {
        if entry.factory == DEFAULT_FACTORY {
            return Ok(FactoryKind::Default);
        }
        self.factories
            .get(&entry.factory)
            .cloned()
            .map(FactoryKind::Custom)
            .ok_or_else(|| RenderingError::UnknownFactory {
                rendering_id: entry.id.clone(),
                factory: entry.factory.clone(),
            })
    }
}

impl DescriptorSource for ManifestSource {
    fn descriptors(&self) -> Result<Vec<RenderingDescriptor>, RenderingError> {
        self.manifest
            .renderings
            .iter()
            .map(|entry| {
                Ok(RenderingDescriptor {
                    id: entry.id.clone(),
                    display_name: entry.name.clone(),
                    factory: self.resolve(entry)?,
                    supported_view_ids: entry.views.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBlock;
    use crate::rendering::Renderer;

    struct Declining;

    impl RendererFactory for Declining {
        fn create(&self, _block: &MemoryBlock, _rendering_id: &str) -> Result<Option<Renderer>, RenderingError> {
            Ok(None)
        }
    }

    const MANIFEST: &str = r#"{
        "renderings": [
            { "id": "raw-hex", "name": "Hex", "views": ["memory"] },
            { "id": "ascii", "name": "ASCII" },
            { "id": "custom", "name": "Custom", "factory": "declining" }
        ]
    }"#;

    #[test]
    fn test_manifest_resolves_factories() {
        let source = ManifestSource::from_json(MANIFEST)
            .unwrap()
            .with_factory("declining", Arc::new(Declining));
        let descriptors = source.descriptors().unwrap();
        assert_eq!(descriptors.len(), 3);
        assert!(matches!(descriptors[0].factory, FactoryKind::Default));
        assert!(matches!(descriptors[2].factory, FactoryKind::Custom(_)));
        assert!(descriptors[0].supports_view("memory"));
        assert!(!descriptors[0].supports_view("registers"));
        assert!(descriptors[1].supports_view("registers"));
    }

    #[test]
    fn test_manifest_unknown_factory() {
        let source = ManifestSource::from_json(MANIFEST).unwrap();
        assert!(matches!(
            source.descriptors(),
            Err(RenderingError::UnknownFactory { factory, .. }) if factory == "declining"
        ));
    }

    #[test]
    fn test_manifest_bad_json() {
        assert!(matches!(
            ManifestSource::from_json("{ \"renderings\": 3 }"),
            Err(RenderingError::Manifest(_))
        ));
    }
}
