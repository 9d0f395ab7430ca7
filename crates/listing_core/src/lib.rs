//! Listing core: filter model, request building, normalization and the pure
//! pagination state machine behind the listing grid.
mod detail;
mod effect;
mod filter;
mod gallery;
mod guard;
mod listing;
mod msg;
mod page;
mod request;
mod state;
mod store;
mod update;
mod view_model;
mod window;

pub use detail::{normalize_detail, DetailSummary, ListingDetail};
pub use effect::Effect;
pub use filter::{
    property_type_api_value, property_type_labels, FilterKey, FilterModel, FilterValue,
};
pub use gallery::Gallery;
pub use guard::FetchGuard;
pub use listing::{normalize, Listing, ListingKey, MediaItem, RawListing, DEFAULT_MEDIA_URL};
pub use msg::Msg;
pub use page::{Epoch, FetchFailure, PageResponse};
pub use request::{build_detail_request, build_request, RequestDescriptor, PAGE_SIZE};
pub use state::{AppState, ContinuationMode, ControllerStatus, FetchPhase};
pub use store::{merge, ListingStore, MergeMode};
pub use update::update;
pub use view_model::{AppViewModel, EmptyState, PaginationView};
pub use window::{
    next_block_target, page_window, prev_block_target, window_size_for_viewport, PageWindow,
    NARROW_VIEWPORT_MAX_WIDTH, NARROW_WINDOW_SIZE, WIDE_WINDOW_SIZE,
};
