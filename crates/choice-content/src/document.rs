//! Path-addressed access to a stored document

use choice_store::{Document, DocumentStore};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::flat::FlatDocument;
use crate::path::{KeyPath, get_at_path};

/// Path-addressed view over a document store.
///
/// Holds no copy of the document. Every read loads the store, and every
/// write is a fresh load, patch, save cycle over the whole document, so
/// edits made by other processes between calls are never clobbered by stale
/// state held here.
#[derive(Debug, Clone)]
pub struct ConfigDocument<S> {
    store: S,
}

impl<S: DocumentStore> ConfigDocument<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the current document
    pub fn load(&self) -> Result<Document> {
        Ok(self.store.load()?)
    }

    /// Read the value at `path`.
    ///
    /// A missing key is reported through `tracing` and yields `Ok(None)`.
    /// Only store failures are returned as errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use choice_content::ConfigDocument;
    /// use choice_store::MemoryStore;
    /// use serde_json::json;
    ///
    /// let doc = ConfigDocument::new(MemoryStore::from_value(json!({"mode": {"fast": 10}})));
    /// assert_eq!(doc.read(["mode", "fast"]).unwrap(), Some(json!(10)));
    /// assert_eq!(doc.read("missing").unwrap(), None);
    /// ```
    pub fn read(&self, path: impl Into<KeyPath>) -> Result<Option<Value>> {
        let path = path.into();
        let document = self.store.load()?;

        match get_at_path(&document, path.segments()) {
            Some(value) => Ok(Some(value.clone())),
            None => {
                tracing::warn!(%path, "Key not found in document");
                Ok(None)
            }
        }
    }

    /// Write `value` at `path` and save the whole document.
    ///
    /// A single-key path sets the top-level key directly. Longer paths go
    /// through the flat view: the document is flattened, the one entry is
    /// set, and the tree is rebuilt, leaving every other leaf untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if the path is empty, passes through a terminal,
    /// or names a parent mapping that does not exist. The store is not
    /// written in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use choice_content::ConfigDocument;
    /// use choice_store::MemoryStore;
    /// use serde_json::json;
    ///
    /// let doc = ConfigDocument::new(MemoryStore::from_value(json!({"mode": {"selection": "fast"}})));
    /// doc.write(["mode", "selection"], "slow").unwrap();
    /// assert_eq!(doc.read(["mode", "selection"]).unwrap(), Some(json!("slow")));
    /// ```
    pub fn write(&self, path: impl Into<KeyPath>, value: impl Into<Value>) -> Result<()> {
        let path = path.into();
        let value = value.into();
        let mut document = self.store.load()?;

        match path.segments() {
            [] => return Err(Error::invalid_path(KeyPath::new(), "path is empty")),
            [key] => {
                document.insert(key.clone(), value);
            }
            _ => {
                let mut flat = FlatDocument::flatten(&document);
                if let Err(e) = flat.set(path.clone(), value) {
                    tracing::warn!(%path, error = %e, "Write abandoned");
                    return Err(e);
                }
                document = flat.reconstruct()?;
            }
        }

        self.store.save(&document)?;
        tracing::debug!(%path, "Wrote value");
        Ok(())
    }
}
