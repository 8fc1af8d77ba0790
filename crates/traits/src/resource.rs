//! ResourceProvider trait for loading report template resources.
//!
//! The report needs three read-only resources (the styles part, the drawing
//! fragment and the header image). Loading them through this trait keeps the
//! package assembler independent of where those bytes live.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// A source of named, immutable template resources.
///
/// Implementations must be safe to read from several report generations at
/// once; a resource is never modified through this trait.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load a resource by its name (a path relative to the provider's root).
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Check if a resource exists.
    fn exists(&self, path: &str) -> bool;

    /// Load a resource and decode it as UTF-8 text.
    fn load_text(&self, path: &str) -> Result<String, ResourceError> {
        let data = self.load(path)?;
        String::from_utf8(data.to_vec())
            .map_err(|e| ResourceError::InvalidFormat(format!("{}: {}", path, e)))
    }

    /// Get the base path for resolving relative resources.
    ///
    /// Returns `None` if the provider doesn't use path-based resolution.
    fn base_path(&self) -> Option<&str> {
        None
    }

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory resource provider.
///
/// Resources must be added before use. Tests use it to feed templates without
/// touching the filesystem.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with_resource(self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut resources) = self.resources.write() {
            resources.insert(path.into(), Arc::new(data.into()));
        }
        self
    }

    /// Add a resource to the in-memory store, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path_string = path.into();
        let mut resources = self
            .resources
            .write()
            .map_err(|_| ResourceError::LoadFailed {
                path: path_string.clone(),
                message: "resource store lock poisoned".to_string(),
            })?;
        resources.insert(path_string, Arc::new(data));
        Ok(())
    }

    /// Remove a resource from the store.
    ///
    /// Returns `None` if the lock is poisoned or the resource doesn't exist.
    pub fn remove(&self, path: &str) -> Option<SharedResourceData> {
        self.resources.write().ok()?.remove(path)
    }

    /// Get the number of resources in the store.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty or the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.resources.read().map(|r| r.is_empty()).unwrap_or(true)
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self
            .resources
            .read()
            .map_err(|_| ResourceError::LoadFailed {
                path: path.to_string(),
                message: "resource store lock poisoned".to_string(),
            })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_provider_add_and_load() {
        let provider = InMemoryResourceProvider::new();
        provider.add("styles.xml", b"<w:styles/>".to_vec()).unwrap();

        let data = provider.load("styles.xml").unwrap();
        assert_eq!(&*data, b"<w:styles/>");
    }

    #[test]
    fn test_in_memory_provider_not_found() {
        let provider = InMemoryResourceProvider::new();
        let result = provider.load("headerimage.gif");
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_with_resource_builder() {
        let provider = InMemoryResourceProvider::new()
            .with_resource("a.xml", "<a/>")
            .with_resource("b.gif", vec![0x47, 0x49, 0x46]);

        assert_eq!(provider.len(), 2);
        assert!(provider.exists("a.xml"));
        assert!(provider.exists("b.gif"));
        assert!(!provider.exists("c.xml"));
    }

    #[test]
    fn test_overwrite_and_remove() {
        let provider = InMemoryResourceProvider::new();
        provider.add("drawing.xml", b"original".to_vec()).unwrap();
        provider.add("drawing.xml", b"updated".to_vec()).unwrap();
        assert_eq!(&*provider.load("drawing.xml").unwrap(), b"updated");
        assert_eq!(provider.len(), 1);

        let removed = provider.remove("drawing.xml");
        assert_eq!(&*removed.unwrap(), b"updated");
        assert!(provider.is_empty());
        assert!(provider.remove("drawing.xml").is_none());
    }

    #[test]
    fn test_load_text_decodes_utf8() {
        let provider = InMemoryResourceProvider::new().with_resource("t.xml", "<x>ø</x>");
        assert_eq!(provider.load_text("t.xml").unwrap(), "<x>ø</x>");
    }

    #[test]
    fn test_load_text_rejects_binary() {
        let provider = InMemoryResourceProvider::new().with_resource("img.gif", vec![0xff, 0xfe, 0x00]);
        let err = provider.load_text("img.gif").unwrap_err();
        assert!(matches!(err, ResourceError::InvalidFormat(_)));
        assert!(err.to_string().contains("img.gif"));
    }

    #[test]
    fn test_in_memory_provider_metadata() {
        let provider = InMemoryResourceProvider::new();
        assert_eq!(provider.name(), "InMemoryResourceProvider");
        assert!(provider.base_path().is_none());
    }

    #[test]
    fn test_resource_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let resource_err: ResourceError = io_err.into();
        assert!(matches!(resource_err, ResourceError::Io(_)));
        assert!(resource_err.to_string().contains("file not found"));
    }
}
