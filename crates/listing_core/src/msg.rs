use crate::filter::FilterModel;
use crate::page::{Epoch, FetchFailure, PageResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The listing screen was shown; starts the first epoch.
    Opened,
    /// User applied a filter set. Equal filters are ignored.
    FiltersApplied(FilterModel),
    /// User asked to reload the current filters after a failure.
    RetryRequested,
    /// Scroll position crossed the load-more threshold.
    ScrollThresholdCrossed,
    /// User clicked a page button (including the first/last affordances).
    PageRequested(u32),
    /// User clicked "Prev" (one window back).
    PrevBlockClicked,
    /// User clicked "Next" (one window forward).
    NextBlockClicked,
    /// Viewport width changed; drives the page-button window size.
    ViewportResized(u32),
    /// A page request finished.
    PageLoaded {
        epoch: Epoch,
        page: u32,
        result: Result<PageResponse, FetchFailure>,
    },
}
