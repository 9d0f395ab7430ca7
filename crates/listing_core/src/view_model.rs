use crate::filter::FilterModel;
use crate::listing::Listing;
use crate::page::FetchFailure;
use crate::state::{ContinuationMode, ControllerStatus};
use crate::window::PageWindow;

/// What to show in place of the grid when there are no listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    NoResults,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub window: PageWindow,
    pub current_page: u32,
    pub total_pages: u32,
    pub can_prev: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub mode: ContinuationMode,
    pub status: ControllerStatus,
    pub filters: FilterModel,
    pub listings: Vec<Listing>,
    pub loading_initial: bool,
    pub loading_more: bool,
    pub has_more: bool,
    pub current_page: u32,
    pub total_pages: u32,
    /// Page of the outstanding request, if any.
    pub pending_page: Option<u32>,
    pub empty_state: Option<EmptyState>,
    /// Only in paged mode with more than one page of results.
    pub pagination: Option<PaginationView>,
    pub last_error: Option<FetchFailure>,
    pub dirty: bool,
}
