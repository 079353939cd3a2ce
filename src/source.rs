//! Record sources feeding bulk construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::record::{Record, Time};

/// Supplies records one at a time to [`Index::generate`](crate::Index::generate).
pub trait RecordSource {
    /// The next record, or an error if the source has failed or run dry.
    fn next_record(&mut self) -> Result<Record>;
}

impl<F> RecordSource for F
where
    F: FnMut() -> Result<Record>,
{
    fn next_record(&mut self) -> Result<Record> {
        self()
    }
}

/// Finite source over an iterator; reports [`Error::SourceExhausted`] once
/// the iterator ends.
pub struct IterSource<I> {
    inner: I,
}

impl<I: Iterator<Item = Record>> RecordSource for IterSource<I> {
    fn next_record(&mut self) -> Result<Record> {
        self.inner.next().ok_or(Error::SourceExhausted)
    }
}

pub fn from_records<I>(records: I) -> IterSource<I::IntoIter>
where
    I: IntoIterator<Item = Record>,
{
    IterSource {
        inner: records.into_iter(),
    }
}

const FIRST_WORDS: &[&str] = &[
    "Adam", "Bella", "Carl", "Diana", "Ethan", "Fiona", "George", "Hanna", "Ivan", "Julia",
    "Kevin", "Laura", "Marco", "Nina", "Oscar", "Paula", "Quinn", "Rosa", "Simon", "Tina",
    "Umar", "Vera", "Walter", "Xenia", "Yusuf", "Zoe",
];

const SECOND_WORDS: &[&str] = &[
    "Abbott", "Bennett", "Carter", "Dalton", "Ellis", "Foster", "Grant", "Hughes", "Ingram",
    "Jensen", "Keller", "Lambert", "Morgan", "Norris", "Owens", "Parker", "Quigley", "Reed",
    "Sutton", "Turner", "Underwood", "Vaughn", "Walsh", "Xiong", "Young", "Zimmer",
];

/// Random "Firstname Lastname" records with random codes; roughly half carry
/// a time of day.
///
/// Identifiers repeat once the name space fills up, which bulk construction
/// tolerates by skipping duplicates.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic source for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for RandomSource {
    fn next_record(&mut self) -> Result<Record> {
        let first = FIRST_WORDS[self.rng.gen_range(0..FIRST_WORDS.len())];
        let second = SECOND_WORDS[self.rng.gen_range(0..SECOND_WORDS.len())];
        // Suffix widens the id space beyond the 26 * 26 name pairs.
        let suffix: u16 = self.rng.gen_range(0..1000);
        let record = Record::new(format!("{first} {second}{suffix}"), self.rng.gen());
        if self.rng.gen_bool(0.5) {
            let time = Time::new(
                self.rng.gen_range(0..24),
                self.rng.gen_range(0..60),
                self.rng.gen_range(0..60),
            );
            Ok(record.with_time(time))
        } else {
            Ok(record)
        }
    }
}
