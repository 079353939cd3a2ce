//! Stored values: an identifier, a code, and an optional time of day.

use std::fmt;

/// Time of day attached to a record.
///
/// Fields are not range checked; whatever is stored is written and read back
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Time {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Time {
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A record keyed by a two-word identifier such as `"Alice Smith"`.
///
/// The identifier cannot be changed once the record exists; cloning produces
/// an independent copy with its own identifier text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    id: String,
    code: u32,
    time: Option<Time>,
}

impl Record {
    pub fn new(id: impl Into<String>, code: u32) -> Self {
        Self {
            id: id.into(),
            code,
            time: None,
        }
    }

    pub fn with_time(mut self, time: Time) -> Self {
        self.time = Some(time);
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn code(&self) -> u32 {
        self.code
    }

    #[inline]
    pub fn time(&self) -> Option<Time> {
        self.time
    }

    /// True when code and time (presence and value) match, ignoring the id.
    pub fn same_payload(&self, other: &Record) -> bool {
        self.code == other.code && self.time == other.time
    }
}
