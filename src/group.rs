//! Bucket groups: one per first initial, each holding 26 singly-linked
//! buckets keyed by second initial.

use crate::ident::ALPHABET;
use crate::record::Record;

type Link = Option<Box<Node>>;

struct Node {
    record: Record,
    next: Link,
}

/// Singly-linked list of records sharing both initials.
///
/// New records go to the front, so the most recently inserted record is the
/// first one a scan meets.
#[derive(Default)]
pub struct Bucket {
    head: Link,
    len: usize,
}

impl Bucket {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn iter(&self) -> BucketIter<'_> {
        BucketIter {
            next: self.head.as_deref(),
        }
    }

    pub(crate) fn push_front(&mut self, record: Record) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { record, next }));
        self.len += 1;
    }

    pub(crate) fn find(&self, id: &str) -> Option<&Record> {
        self.iter().find(|r| r.id() == id)
    }

    /// Unlink the record with this id and hand it back.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Record> {
        let pos = self.iter().position(|r| r.id() == id)?;
        let mut link = &mut self.head;
        for _ in 0..pos {
            link = &mut link.as_mut()?.next;
        }
        let node = link.take()?;
        let Node { record, next } = *node;
        *link = next;
        self.len -= 1;
        Some(record)
    }
}

// Chains can be long, so clone and drop walk them iteratively instead of
// recursing through `Box<Node>`.
impl Clone for Bucket {
    fn clone(&self) -> Self {
        let records: Vec<&Record> = self.iter().collect();
        let mut out = Bucket::default();
        for record in records.into_iter().rev() {
            out.push_front(record.clone());
        }
        out
    }
}

impl Drop for Bucket {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[derive(Default)]
pub struct BucketIter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for BucketIter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.record
        })
    }
}

/// All records whose first initial is `letter`, split into 26 buckets by
/// second initial.
#[derive(Clone, Debug)]
pub struct BucketGroup {
    letter: u8,
    buckets: [Bucket; ALPHABET],
}

impl BucketGroup {
    pub(crate) fn new(letter: u8) -> Self {
        Self {
            letter,
            buckets: std::array::from_fn(|_| Bucket::default()),
        }
    }

    /// Uppercase ASCII first initial this group holds.
    #[inline]
    pub fn letter(&self) -> u8 {
        self.letter
    }

    #[inline]
    pub fn buckets(&self) -> &[Bucket; ALPHABET] {
        &self.buckets
    }

    #[inline]
    pub fn bucket(&self, slot: usize) -> &Bucket {
        &self.buckets[slot]
    }

    #[inline]
    pub(crate) fn bucket_mut(&mut self, slot: usize) -> &mut Bucket {
        &mut self.buckets[slot]
    }

    /// True when all 26 buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }
}
