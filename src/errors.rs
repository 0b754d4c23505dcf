use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("Document has no root element")]
    NoRoot,
    #[error("Document ends inside <{0}>")]
    Truncated(String),
    #[error("Missing <{0}> element")]
    MissingElement(&'static str),
}

/// Failure to produce a single record from a `RecordSource`.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Unable to read \"{}\": {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Unable to parse XML from \"{key}\": {source}")]
    Parse { key: String, source: ParseError },

    #[error("No record with key \"{0}\"")]
    Missing(String),
}

#[derive(Debug, Error)]
pub enum DependsError {
    #[error("Index unavailable: {0}")]
    IndexUnavailable(#[source] RecordError),

    #[error("Record \"{key}\" unavailable: {source}")]
    RecordUnavailable { key: String, source: RecordError },

    #[error("Unable to open output file \"{}\": {source}", .path.display())]
    OutputUnwritable { path: PathBuf, source: std::io::Error },
}

impl DependsError {
    /// Whether the run has to stop. Only a missing corpus root or an unwritable
    /// destination ends a run; everything else degrades the graph instead.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::RecordUnavailable { .. })
    }
}
