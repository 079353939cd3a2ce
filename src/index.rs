//! The two-level index: bucket groups ordered by first initial, each with 26
//! buckets keyed by second initial.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::codec;
use crate::error::{Error, Result};
use crate::group::{Bucket, BucketGroup, BucketIter};
use crate::ident;
use crate::record::Record;
use crate::source::RecordSource;
use crate::Config;

/// Records indexed by the initials of their two-word identifiers.
///
/// Groups are kept strictly ascending by first initial and a group is dropped
/// as soon as its last record is removed. The index owns every record it
/// holds; lookups hand out borrowed views.
#[derive(Clone, Default)]
pub struct Index {
    groups: Vec<BucketGroup>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index of exactly `n` records pulled from `source`.
    ///
    /// Records the index rejects (duplicate or malformed ids) are skipped and
    /// more are pulled. A failing source aborts construction.
    pub fn generate<S>(n: usize, source: &mut S, config: &Config) -> Result<Self>
    where
        S: RecordSource + ?Sized,
    {
        let mut index = Index::new();
        let batch_size = config.batch_size.max(1);
        let mut batch = Vec::with_capacity(batch_size.min(n));
        let mut stored = 0usize;
        let mut rejected = 0usize;

        while stored < n {
            let want = batch_size.min(n - stored);
            for _ in 0..want {
                batch.push(source.next_record()?);
            }
            for record in batch.drain(..) {
                match index.insert_owned(record) {
                    Ok(()) => {
                        stored += 1;
                        rejected = 0;
                    }
                    Err(err) => {
                        debug!(error = %err, "skipped generated record");
                        rejected += 1;
                        if config.max_rejections.is_some_and(|max| rejected > max) {
                            return Err(err);
                        }
                    }
                }
            }
        }

        debug!(records = stored, groups = index.groups.len(), "generated index");
        Ok(index)
    }

    /// Read an index previously written with [`Index::write`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        codec::read_file(path)
    }

    /// Write every record to `path` in the binary file format.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        codec::write_file(self, path)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.groups.iter().map(BucketGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Groups in ascending first-initial order.
    pub fn groups(&self) -> &[BucketGroup] {
        &self.groups
    }

    /// First initials that currently have a group, ascending.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.groups.iter().map(|g| char::from(g.letter()))
    }

    /// Store a copy of `record`. The caller keeps the original.
    pub fn insert(&mut self, record: &Record) -> Result<()> {
        self.insert_owned(record.clone())
    }

    pub(crate) fn insert_owned(&mut self, record: Record) -> Result<()> {
        let initials = ident::parse(record.id())?;
        let letter = initials
            .first_letter()
            .ok_or_else(|| Error::invalid(record.id(), "first initial is not a letter"))?;
        let slot = initials
            .second_slot()
            .ok_or_else(|| Error::invalid(record.id(), "second initial is not a letter"))?;
        if self.contains(record.id()) {
            return Err(Error::DuplicateIdentifier(record.id().to_owned()));
        }

        let pos = match self.groups.binary_search_by_key(&letter, BucketGroup::letter) {
            Ok(pos) => pos,
            Err(pos) => {
                debug!(letter = %char::from(letter), "created bucket group");
                self.groups.insert(pos, BucketGroup::new(letter));
                pos
            }
        };
        self.groups[pos].bucket_mut(slot).push_front(record);
        Ok(())
    }

    /// Remove the record with this id and return it.
    ///
    /// A malformed id is `InvalidIdentifier`; a well-formed id with no record
    /// (including one whose initials are not letters) is `NotFound`.
    pub fn remove(&mut self, id: &str) -> Result<Record> {
        ident::parse(id)?;
        let (pos, slot) = self
            .locate(id)
            .ok_or_else(|| Error::NotFound(id.to_owned()))?;
        let group = &mut self.groups[pos];
        let record = group
            .bucket_mut(slot)
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.to_owned()))?;
        if group.is_empty() {
            let group = self.groups.remove(pos);
            debug!(letter = %char::from(group.letter()), "dropped empty bucket group");
        }
        Ok(record)
    }

    /// Look up a record. Malformed ids are simply not found.
    pub fn find(&self, id: &str) -> Option<&Record> {
        let (pos, slot) = self.locate(id)?;
        self.groups[pos].bucket(slot).find(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Records in traversal order: group order, then bucket `A..=Z`, then
    /// most recent first within a bucket.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            groups: self.groups.iter(),
            buckets: Default::default(),
            records: BucketIter::default(),
        }
    }

    fn locate(&self, id: &str) -> Option<(usize, usize)> {
        let initials = ident::parse(id).ok()?;
        let letter = initials.first_letter()?;
        let slot = initials.second_slot()?;
        let pos = self
            .groups
            .binary_search_by_key(&letter, BucketGroup::letter)
            .ok()?;
        Some((pos, slot))
    }
}

/// Same record count, and every record here has a counterpart in `other`
/// with the same id, code, and time.
impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|record| {
                other
                    .find(record.id())
                    .is_some_and(|theirs| record.same_payload(theirs))
            })
    }
}

impl Eq for Index {}

/// One `"<id> <code>"` line per record, in traversal order.
impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in self.iter() {
            writeln!(f, "{} {}", record.id(), record.code())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a Record;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    groups: std::slice::Iter<'a, BucketGroup>,
    buckets: std::slice::Iter<'a, Bucket>,
    records: BucketIter<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.records.next() {
                return Some(record);
            }
            if let Some(bucket) = self.buckets.next() {
                self.records = bucket.iter();
                continue;
            }
            self.buckets = self.groups.next()?.buckets().iter();
        }
    }
}
