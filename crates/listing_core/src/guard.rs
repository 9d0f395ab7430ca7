use std::collections::BTreeSet;

/// Single-flight gate for page fetches within one filter epoch.
///
/// At most one page is in flight at a time, and a page that already loaded
/// successfully in this epoch is not fetched again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchGuard {
    in_flight: Option<u32>,
    fetched_pages: BTreeSet<u32>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false without side effects when a fetch is outstanding or the
    /// page is already fetched; otherwise marks `page` in flight.
    pub fn try_acquire(&mut self, page: u32) -> bool {
        if self.in_flight.is_some() || self.fetched_pages.contains(&page) {
            return false;
        }
        self.in_flight = Some(page);
        true
    }

    /// Clears the in-flight mark. Successful pages are remembered.
    pub fn release(&mut self, page: u32, success: bool) {
        if self.in_flight == Some(page) {
            self.in_flight = None;
        }
        if success {
            self.fetched_pages.insert(page);
        }
    }

    /// Forgets fetched pages but keeps any in-flight mark.
    pub fn forget_fetched(&mut self) {
        self.fetched_pages.clear();
    }

    /// Full reset at an epoch boundary.
    pub fn reset(&mut self) {
        self.in_flight = None;
        self.fetched_pages.clear();
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight_page(&self) -> Option<u32> {
        self.in_flight
    }

    pub fn has_fetched(&self, page: u32) -> bool {
        self.fetched_pages.contains(&page)
    }

    pub fn fetched_pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.fetched_pages.iter().copied()
    }
}
