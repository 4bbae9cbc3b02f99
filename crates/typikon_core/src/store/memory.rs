use super::{ContentStore, StoreError, StoreResult};
use std::collections::BTreeMap;

/// Documents held in memory, e.g. a bundle shipped as one JSON object.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    documents: BTreeMap<String, String>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a `{"path": "document text", ...}` bundle.
    pub fn from_json(bundle: &str) -> StoreResult<Self> {
        let documents: BTreeMap<String, String> = serde_json::from_str(bundle)
            .map_err(|err| StoreError::InvalidBundle(err.to_string()))?;
        Ok(Self { documents })
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }

    pub fn with_document(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ContentStore for MemoryContentStore {
    fn has(&self, path: &str) -> StoreResult<bool> {
        Ok(self.documents.contains_key(path))
    }

    fn get(&self, path: &str) -> StoreResult<String> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_string(),
            })
    }
}
