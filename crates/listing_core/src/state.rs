use engine_logging::{engine_debug, engine_info};

use crate::effect::Effect;
use crate::filter::FilterModel;
use crate::guard::FetchGuard;
use crate::listing::{normalize, Listing};
use crate::page::{Epoch, FetchFailure, PageResponse};
use crate::request::{build_request, PAGE_SIZE};
use crate::store::{ListingStore, MergeMode};
use crate::view_model::{AppViewModel, EmptyState, PaginationView};
use crate::window::{page_window, window_size_for_viewport, WIDE_WINDOW_SIZE};

/// How a screen continues past the first page. Fixed for the life of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinuationMode {
    /// Scrolling appends the next page.
    #[default]
    InfiniteScroll,
    /// Page buttons replace the visible page.
    Paged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    FetchingInitial,
    FetchingMore,
}

/// Observable controller state, derived from phase, `has_more` and the last error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerStatus {
    #[default]
    Idle,
    FetchingInitial,
    FetchingMore,
    Exhausted,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlightFetch {
    page: u32,
    merge: MergeMode,
}

/// Everything the listing screen knows. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    mode: ContinuationMode,
    filters: FilterModel,
    epoch: Epoch,
    phase: FetchPhase,
    in_flight: Option<InFlightFetch>,
    guard: FetchGuard,
    store: ListingStore,
    current_page: u32,
    total_pages: u32,
    page_size: u32,
    has_more: bool,
    last_error: Option<FetchFailure>,
    window_size: u32,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ContinuationMode::default())
    }
}

impl AppState {
    pub fn new(mode: ContinuationMode) -> Self {
        Self {
            mode,
            filters: FilterModel::new(),
            epoch: Epoch::NONE,
            phase: FetchPhase::Idle,
            in_flight: None,
            guard: FetchGuard::new(),
            store: ListingStore::new(),
            current_page: 1,
            total_pages: 1,
            page_size: PAGE_SIZE,
            has_more: true,
            last_error: None,
            window_size: WIDE_WINDOW_SIZE,
            dirty: false,
        }
    }

    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.window_size = window_size_for_viewport(width);
        self
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            mode: self.mode,
            status: self.status(),
            filters: self.filters.clone(),
            listings: self.store.listings().to_vec(),
            loading_initial: self.phase == FetchPhase::FetchingInitial,
            loading_more: self.phase == FetchPhase::FetchingMore,
            has_more: self.has_more,
            current_page: self.current_page,
            total_pages: self.total_pages,
            pending_page: self.in_flight.map(|fetch| fetch.page),
            empty_state: self.empty_state(),
            pagination: self.pagination(),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn mode(&self) -> ContinuationMode {
        self.mode
    }

    pub fn filters(&self) -> &FilterModel {
        &self.filters
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn has_started(&self) -> bool {
        self.epoch != Epoch::NONE
    }

    pub fn listings(&self) -> &[Listing] {
        self.store.listings()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    pub fn is_fetching(&self) -> bool {
        self.phase != FetchPhase::Idle
    }

    pub fn guard(&self) -> &FetchGuard {
        &self.guard
    }

    pub fn status(&self) -> ControllerStatus {
        match self.phase {
            FetchPhase::FetchingInitial => ControllerStatus::FetchingInitial,
            FetchPhase::FetchingMore => ControllerStatus::FetchingMore,
            FetchPhase::Idle if self.last_error.is_some() => ControllerStatus::Error,
            FetchPhase::Idle if !self.has_more => ControllerStatus::Exhausted,
            FetchPhase::Idle => ControllerStatus::Idle,
        }
    }

    /// Returns whether state changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_window_size(&mut self, window_size: u32) {
        if self.window_size != window_size {
            self.window_size = window_size;
            self.mark_dirty();
        }
    }

    /// Starts a new epoch: clears the store and guard and requests page 1.
    pub(crate) fn start_epoch(&mut self, filters: FilterModel) -> Vec<Effect> {
        self.epoch = self.epoch.next();
        self.filters = filters;
        self.guard.reset();
        self.store.clear();
        self.in_flight = None;
        self.current_page = 1;
        self.total_pages = 1;
        self.has_more = true;
        self.last_error = None;
        self.mark_dirty();
        engine_info!("Starting epoch {} with {:?}", self.epoch, self.filters);
        self.begin_fetch(1, MergeMode::Replace, FetchPhase::FetchingInitial)
            .into_iter()
            .collect()
    }

    /// Issues a request for `page` if the guard admits it.
    pub(crate) fn begin_fetch(
        &mut self,
        page: u32,
        merge: MergeMode,
        phase: FetchPhase,
    ) -> Option<Effect> {
        if !self.guard.try_acquire(page) {
            engine_debug!(
                "Dropped fetch of page {} in epoch {} (in flight: {:?})",
                page,
                self.epoch,
                self.guard.in_flight_page()
            );
            return None;
        }
        self.phase = phase;
        self.in_flight = Some(InFlightFetch { page, merge });
        self.mark_dirty();
        Some(Effect::FetchPage {
            epoch: self.epoch,
            page,
            request: build_request(&self.filters, page, self.page_size),
        })
    }

    /// Forgets fetched pages ahead of a non-sequential jump.
    pub(crate) fn forget_fetched_pages(&mut self) {
        self.guard.forget_fetched();
    }

    /// Applies a response for the current epoch. Returns false when `page` is
    /// not the outstanding request.
    pub(crate) fn apply_page_result(
        &mut self,
        page: u32,
        result: Result<PageResponse, FetchFailure>,
    ) -> bool {
        let merge = match self.in_flight {
            Some(fetch) if fetch.page == page => fetch.merge,
            _ => return false,
        };
        self.in_flight = None;
        self.phase = FetchPhase::Idle;
        self.mark_dirty();

        match result {
            Ok(response) => {
                self.guard.release(page, true);
                let record_count = response.record_count();
                let listings: Vec<Listing> = response.records.iter().map(normalize).collect();
                let added = self.store.apply(listings, merge);
                self.has_more = record_count == self.page_size as usize;
                self.current_page = response
                    .current_page
                    .filter(|reported| *reported >= 1)
                    .unwrap_or(page);
                self.total_pages = response
                    .total_pages
                    .filter(|reported| *reported >= 1)
                    .unwrap_or_else(|| self.total_pages.max(self.current_page));
                self.last_error = None;
                engine_debug!(
                    "Epoch {} page {}: {} records, {} added ({:?}), has_more={}",
                    self.epoch,
                    page,
                    record_count,
                    added,
                    merge,
                    self.has_more
                );
            }
            Err(failure) => {
                self.guard.release(page, false);
                self.has_more = false;
                self.last_error = Some(failure);
            }
        }
        true
    }

    fn empty_state(&self) -> Option<EmptyState> {
        if !self.store.is_empty() || !self.has_started() {
            return None;
        }
        if self.phase == FetchPhase::FetchingInitial {
            Some(EmptyState::Loading)
        } else if self.last_error.is_some() {
            Some(EmptyState::LoadFailed)
        } else {
            Some(EmptyState::NoResults)
        }
    }

    fn pagination(&self) -> Option<PaginationView> {
        if self.mode != ContinuationMode::Paged
            || self.total_pages <= 1
            || self.store.is_empty()
        {
            return None;
        }
        Some(PaginationView {
            window: page_window(self.current_page, self.total_pages, self.window_size),
            current_page: self.current_page,
            total_pages: self.total_pages,
            can_prev: self.current_page > 1,
            can_next: self.current_page < self.total_pages,
        })
    }
}
