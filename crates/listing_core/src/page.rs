use std::fmt;

use crate::listing::RawListing;

/// Identifies one filter context. Results from any other epoch are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    /// Before the first epoch has started.
    pub const NONE: Epoch = Epoch(0);

    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Epoch {
        Epoch(self.0 + 1)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One decoded page of results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageResponse {
    pub records: Vec<RawListing>,
    /// Records dropped for lacking a usable `ListingKey`.
    pub skipped: usize,
    /// Present only in the envelope form.
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
}

impl PageResponse {
    /// Number of records the server returned, usable or not.
    pub fn record_count(&self) -> usize {
        self.records.len() + self.skipped
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Request rejected, failed, or timed out.
    Network(String),
    /// Body was not JSON or not a recognised shape.
    Parse(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Network(message) => write!(f, "network failure: {message}"),
            FetchFailure::Parse(message) => write!(f, "parse failure: {message}"),
        }
    }
}
