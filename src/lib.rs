//! # s2ds
//!
//! An in-memory collection of records keyed by two-word identifiers such as
//! `"Alice Smith"`, indexed by the initials of both words.
//!
//! The first initial selects a bucket group (groups are kept in ascending
//! letter order and exist only while they hold records); the second initial
//! selects one of the group's 26 buckets. Each bucket is a singly-linked list
//! with the most recently inserted record at the front.
//!
//! Indexes persist to a compact little-endian binary file (see [`codec`]).
//!
//! ## Example
//!
//! ```rust
//! use s2ds::{Index, Record, Time};
//!
//! let mut index = Index::new();
//! index.insert(&Record::new("Alice Smith", 1)).unwrap();
//! index.insert(&Record::new("Bob Smith", 2).with_time(Time::new(9, 30, 0))).unwrap();
//!
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.find("Alice Smith").map(|r| r.code()), Some(1));
//!
//! index.remove("Alice Smith").unwrap();
//! assert!(index.find("Alice Smith").is_none());
//! ```

#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod group;
pub mod ident;
pub mod index;
pub mod record;
pub mod source;

pub use error::{Error, Result};
pub use group::{Bucket, BucketGroup};
pub use index::Index;
pub use record::{Record, Time};
pub use source::{RandomSource, RecordSource};

/// Settings for [`Index::generate`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Records pulled from the source per batch.
    pub batch_size: usize,
    /// Give up after this many consecutive rejected records. `None` keeps
    /// pulling for as long as the source produces records.
    pub max_rejections: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: 32,
            max_rejections: None,
        }
    }
}


#[cfg(test)]
mod proptests;
