//! Engine Registry for Version Management
//!
//! Documents are registered under their qualified name (`respiratory_risk_v1`)
//! and compiled once at registration. Callers share the compiled engine
//! through an `Arc`, so a pipeline holding an engine keeps working even after
//! the document it came from is deprecated.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use vitalguard_core::FuzzyInferenceEngine;

use crate::{document::EngineDocument, documents::builtin_documents, ConfigError};

/// Registry bookkeeping for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineMetadata {
    /// Base name (e.g. "respiratory_risk")
    pub name: String,

    /// Version tag (e.g. "v1", "v2")
    pub version: String,

    /// Full qualified name (e.g. "respiratory_risk_v1")
    pub qualified_name: String,

    /// Whether this document is deprecated
    pub deprecated: bool,

    /// Replacement document if deprecated
    pub replacement: Option<String>,
}

struct Entry {
    document: EngineDocument,
    metadata: EngineMetadata,
    engine: Arc<FuzzyInferenceEngine>,
}

/// Thread-safe engine registry with version management
pub struct ConfigRegistry {
    /// Entries indexed by qualified name
    entries: RwLock<HashMap<String, Entry>>,

    /// Version mappings (name -> [versions]) in registration order
    versions: RwLock<HashMap<String, Vec<String>>>,
}

impl ConfigRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            versions: RwLock::new(HashMap::new()),
        }
    }

    /// Validate, compile and register a document
    pub fn register(&self, document: EngineDocument) -> Result<(), ConfigError> {
        let report = document.validate();
        if !report.is_valid() {
            return Err(ConfigError::Invalid(report.error_summary()));
        }

        let qualified_name = document.qualified_name();
        let engine = Arc::new(document.to_engine()?);
        let metadata = EngineMetadata {
            name: document.name.clone(),
            version: document.version.clone(),
            qualified_name: qualified_name.clone(),
            deprecated: false,
            replacement: None,
        };

        {
            let mut entries = self.entries.write().map_err(|_| ConfigError::LockPoisoned)?;
            if entries.contains_key(&qualified_name) {
                return Err(ConfigError::Invalid(format!(
                    "engine {qualified_name} already registered"
                )));
            }
            entries.insert(
                qualified_name,
                Entry {
                    document,
                    metadata: metadata.clone(),
                    engine,
                },
            );
        }

        let mut versions = self.versions.write().map_err(|_| ConfigError::LockPoisoned)?;
        versions
            .entry(metadata.name)
            .or_default()
            .push(metadata.version);

        Ok(())
    }

    /// Get a document by qualified name
    pub fn get(&self, name: &str) -> Result<EngineDocument, ConfigError> {
        let entries = self.entries.read().map_err(|_| ConfigError::LockPoisoned)?;
        entries
            .get(name)
            .map(|entry| entry.document.clone())
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    /// Qualified name of the highest non-deprecated version
    pub fn latest_name(&self, base_name: &str) -> Result<String, ConfigError> {
        let entries = self.entries.read().map_err(|_| ConfigError::LockPoisoned)?;
        entries
            .values()
            .filter(|entry| entry.metadata.name == base_name && !entry.metadata.deprecated)
            .max_by_key(|entry| entry.document.version_number())
            .map(|entry| entry.metadata.qualified_name.clone())
            .ok_or_else(|| ConfigError::NotFound(format!("no active versions of {base_name}")))
    }

    /// Get the latest non-deprecated version of a document
    pub fn get_latest(&self, base_name: &str) -> Result<EngineDocument, ConfigError> {
        self.get(&self.latest_name(base_name)?)
    }

    /// Get all versions of a document in registration order
    pub fn get_versions(&self, base_name: &str) -> Result<Vec<String>, ConfigError> {
        let versions = self.versions.read().map_err(|_| ConfigError::LockPoisoned)?;
        Ok(versions.get(base_name).cloned().unwrap_or_default())
    }

    /// Get document metadata
    pub fn get_metadata(&self, name: &str) -> Result<EngineMetadata, ConfigError> {
        let entries = self.entries.read().map_err(|_| ConfigError::LockPoisoned)?;
        entries
            .get(name)
            .map(|entry| entry.metadata.clone())
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    /// Compiled engine by qualified name
    pub fn engine(&self, name: &str) -> Result<Arc<FuzzyInferenceEngine>, ConfigError> {
        let entries = self.entries.read().map_err(|_| ConfigError::LockPoisoned)?;
        entries
            .get(name)
            .map(|entry| Arc::clone(&entry.engine))
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    /// Compiled engine of the latest non-deprecated version
    pub fn latest_engine(&self, base_name: &str) -> Result<Arc<FuzzyInferenceEngine>, ConfigError> {
        self.engine(&self.latest_name(base_name)?)
    }

    /// Mark a document as deprecated
    pub fn deprecate(&self, name: &str, replacement: Option<String>) -> Result<(), ConfigError> {
        let mut entries = self.entries.write().map_err(|_| ConfigError::LockPoisoned)?;
        let entry = entries
            .get_mut(name)
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))?;

        entry.metadata.deprecated = true;
        entry.metadata.replacement = replacement;

        Ok(())
    }

    /// Register every document shipped with the crate
    pub fn load_builtin(&self) -> Result<(), ConfigError> {
        for document in builtin_documents()? {
            self.register(document)?;
        }
        Ok(())
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh registry populated by `load`; a failed load is logged and leaves
/// whatever was registered before the failure
fn populated_with<F>(load: F) -> ConfigRegistry
where
    F: FnOnce(&ConfigRegistry) -> Result<(), ConfigError>,
{
    let registry = ConfigRegistry::new();
    if let Err(e) = load(&registry) {
        log::warn!("built-in engine documents not loaded: {e}");
    }
    registry
}

lazy_static::lazy_static! {
    /// Global registry with the built-in documents loaded
    pub static ref GLOBAL_REGISTRY: ConfigRegistry = populated_with(ConfigRegistry::load_builtin);
}
