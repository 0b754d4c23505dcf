//! Access to Doxygen records by reference key.
//!
//! The graph builder never touches the filesystem directly; it asks a
//! `RecordSource` for the text of a record and lets the provided methods parse it.
use crate::errors::RecordError;
use crate::parser::{self, CompoundRecord, IndexRecord};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key of the root record. Doxygen always names it `index.xml`.
pub const INDEX_KEY: &str = "index";

pub trait RecordSource: Sync {
    /// Raw text of the record identified by `key`.
    ///
    /// # Errors
    /// Returns `RecordError` if the record does not exist or cannot be read.
    fn read(&self, key: &str) -> Result<String, RecordError>;

    /// Fetch and parse the root index record.
    ///
    /// # Errors
    /// Returns `RecordError` if the index cannot be read or is not valid XML.
    fn index(&self) -> Result<IndexRecord, RecordError> {
        let text = self.read(INDEX_KEY)?;
        parser::parse_index(&text).map_err(|source| RecordError::Parse { key: INDEX_KEY.to_string(), source })
    }

    /// Fetch and parse the detail record of a class or group.
    ///
    /// # Errors
    /// Returns `RecordError` if the record cannot be read or is not valid XML.
    fn compound(&self, key: &str) -> Result<CompoundRecord, RecordError> {
        let text = self.read(key)?;
        parser::parse_compound(&text).map_err(|source| RecordError::Parse { key: key.to_string(), source })
    }
}

/// Records stored as `<key>.xml` files in one directory (Doxygen's `XML_OUTPUT`).
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.xml"))
    }
}

impl RecordSource for DirectorySource {
    fn read(&self, key: &str) -> Result<String, RecordError> {
        let path = self.path_for(key);
        fs::read_to_string(&path).map_err(|source| RecordError::Io { path, source })
    }
}

/// Records held in memory, keyed by reference key. Handy for tests and for
/// callers that already have the XML at hand.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: HashMap<String, String>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, xml: impl Into<String>) {
        self.records.insert(key.into(), xml.into());
    }

    #[must_use]
    pub fn with_record(mut self, key: impl Into<String>, xml: impl Into<String>) -> Self {
        self.insert(key, xml);
        self
    }
}

impl RecordSource for MemorySource {
    fn read(&self, key: &str) -> Result<String, RecordError> {
        self.records.get(key).cloned().ok_or_else(|| RecordError::Missing(key.to_string()))
    }
}
