//! Document store trait and implementations

use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::{Result, StoreFormat, io};

/// Root mapping of a document
pub type Document = Map<String, Value>;

/// Loads and saves a whole document.
///
/// `load` returns the empty mapping when the store is empty or absent.
/// `save` replaces the stored document entirely.
pub trait DocumentStore {
    fn load(&self) -> Result<Document>;

    fn save(&self, document: &Document) -> Result<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn load(&self) -> Result<Document> {
        (**self).load()
    }

    fn save(&self, document: &Document) -> Result<()> {
        (**self).save(document)
    }
}

/// File-backed store.
///
/// Format is detected from the file extension:
/// - `.yaml`, `.yml` -> YAML
/// - `.json` -> JSON
/// - `.toml` -> TOML
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: StoreFormat,
}

impl FileStore {
    /// Create a store for `path`, detecting the format from its extension.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = StoreFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    /// Create a store with an explicit format, ignoring the extension.
    pub fn with_format(path: impl Into<PathBuf>, format: StoreFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> StoreFormat {
        self.format
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<Document> {
        match io::read_text_if_exists(&self.path)? {
            Some(content) => {
                tracing::debug!(path = %self.path.display(), format = self.format.name(), "Loading document");
                self.format.parse(&content, &self.path)
            }
            None => {
                tracing::debug!(path = %self.path.display(), "Document absent, using empty mapping");
                Ok(Document::new())
            }
        }
    }

    fn save(&self, document: &Document) -> Result<()> {
        let content = self.format.render(document, &self.path)?;
        io::replace_document(&self.path, content.as_bytes())?;
        Ok(())
    }
}

/// In-process store holding the document as a value.
///
/// Counts saves so callers can tell whether an operation wrote back.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Document>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new(document: Document) -> Self {
        Self {
            document: RefCell::new(document),
            saves: Cell::new(0),
        }
    }

    /// Build a store from a JSON value; anything but an object starts empty.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::new(map),
            _ => Self::default(),
        }
    }

    /// Current stored document
    pub fn snapshot(&self) -> Value {
        Value::Object(self.document.borrow().clone())
    }

    /// Number of successful saves so far
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Document> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, document: &Document) -> Result<()> {
        *self.document.borrow_mut() = document.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
