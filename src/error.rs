//! Error type shared by every index operation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the index, its codec, and record sources.
#[derive(Debug, Error)]
pub enum Error {
    /// The identifier is not two words separated by a space, or an initial is
    /// not a letter.
    #[error("invalid identifier {id:?}: {reason}")]
    InvalidIdentifier { id: String, reason: &'static str },

    /// A record with this identifier is already stored.
    #[error("identifier {0:?} already exists")]
    DuplicateIdentifier(String),

    /// No record with this identifier is stored.
    #[error("no record with identifier {0:?}")]
    NotFound(String),

    /// The input is not a well-formed index file.
    #[error("corrupt file: {0}")]
    CorruptFile(String),

    /// Writing an index with no records.
    #[error("refusing to write an empty index")]
    EmptyStructure,

    /// A file could not be opened or created.
    #[error("cannot open {path:?}: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure on an already-open stream.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A length does not fit the 32-bit fields of the file format.
    #[error("{what} of {len} does not fit the file format")]
    Oversized { what: &'static str, len: usize },

    /// A finite record source ran dry before bulk construction finished.
    #[error("record source exhausted")]
    SourceExhausted,
}

impl Error {
    pub(crate) fn invalid(id: &str, reason: &'static str) -> Self {
        Error::InvalidIdentifier {
            id: id.to_owned(),
            reason,
        }
    }
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, Error>;
