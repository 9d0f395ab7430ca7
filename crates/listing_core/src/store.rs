use std::collections::HashSet;

use crate::listing::{Listing, ListingKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Epoch start or a discrete page jump.
    Replace,
    /// Sequential scroll continuation.
    Append,
}

/// Merges a fetched page into the current collection.
///
/// Both modes keep the first occurrence of every `ListingKey`; existing
/// listings are never reordered.
pub fn merge(existing: &[Listing], incoming: Vec<Listing>, mode: MergeMode) -> Vec<Listing> {
    let (mut merged, mut seen) = match mode {
        MergeMode::Replace => (Vec::with_capacity(incoming.len()), HashSet::new()),
        MergeMode::Append => {
            let seen: HashSet<ListingKey> =
                existing.iter().map(|listing| listing.key.clone()).collect();
            let mut merged = Vec::with_capacity(existing.len() + incoming.len());
            merged.extend_from_slice(existing);
            (merged, seen)
        }
    };
    for listing in incoming {
        if seen.insert(listing.key.clone()) {
            merged.push(listing);
        }
    }
    merged
}

/// Ordered, duplicate-free listings of the active epoch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many listings the merge added.
    pub fn apply(&mut self, incoming: Vec<Listing>, mode: MergeMode) -> usize {
        let before = match mode {
            MergeMode::Replace => 0,
            MergeMode::Append => self.listings.len(),
        };
        self.listings = merge(&self.listings, incoming, mode);
        self.listings.len() - before
    }

    pub fn clear(&mut self) {
        self.listings.clear();
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
