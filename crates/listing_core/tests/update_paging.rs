mod common;

use common::*;
use listing_core::{
    update, AppState, ContinuationMode, ControllerStatus, Epoch, FetchFailure, Msg, PageWindow,
};
use pretty_assertions::assert_eq;

fn paged_with_first_page(total: u32) -> (AppState, Epoch) {
    init_logging();
    let state = AppState::new(ContinuationMode::Paged).with_viewport_width(1280);
    let (state, effects) = update(state, Msg::Opened);
    let (epoch, page, _) = fetch_of(&effects);
    assert_eq!(page, 1);
    let state = loaded(state, epoch, 1, envelope(page_of("p1", 1, 12), 1, total));
    (state, epoch)
}

#[test]
fn first_page_renders_window_with_last_affordance() {
    let (state, _) = paged_with_first_page(37);
    let pagination = state.view().pagination.expect("pagination");
    assert_eq!(
        pagination.window,
        PageWindow {
            start: 1,
            end: 10,
            show_first: false,
            show_last: true,
        }
    );
    assert!(!pagination.can_prev);
    assert!(pagination.can_next);
}

#[test]
fn jump_replaces_page_and_pins_final_window() {
    let (state, epoch) = paged_with_first_page(37);

    let (state, effects) = update(state, Msg::PageRequested(37));
    let (_, page, query) = fetch_of(&effects);
    assert_eq!(page, 37);
    assert_eq!(query, "page=37&page_size=12");
    assert_eq!(state.view().pending_page, Some(37));
    // The visible page changes only when the response lands.
    assert_eq!(state.current_page(), 1);

    let state = loaded(state, epoch, 37, envelope(page_of("p37", 1, 5), 37, 37));
    assert_eq!(keys(&state), (1..=5).map(|n| format!("p37-{n}")).collect::<Vec<_>>());
    assert_eq!(state.current_page(), 37);
    assert!(!state.has_more());

    let pagination = state.view().pagination.expect("pagination");
    assert_eq!((pagination.window.start, pagination.window.end), (28, 37));
    assert!(pagination.window.show_first);
    assert!(!pagination.window.show_last);
    assert!(!pagination.can_next);

    // A short last page does not lock the user out of earlier pages.
    let (_state, effects) = update(state, Msg::PageRequested(1));
    assert_eq!(fetch_of(&effects).1, 1);
}

#[test]
fn jump_back_to_fetched_page_refetches() {
    let (state, epoch) = paged_with_first_page(5);
    let (state, effects) = update(state, Msg::PageRequested(2));
    assert_eq!(fetch_of(&effects).1, 2);
    let state = loaded(state, epoch, 2, envelope(page_of("p2", 1, 12), 2, 5));
    assert_eq!(state.status(), ControllerStatus::Idle);

    let (state, effects) = update(state, Msg::PageRequested(1));
    assert_eq!(fetch_of(&effects).1, 1);
    assert!(state.view().loading_initial);
}

#[test]
fn block_navigation_moves_by_window() {
    let (state, epoch) = paged_with_first_page(37);

    let (state, effects) = update(state, Msg::NextBlockClicked);
    assert_eq!(fetch_of(&effects).1, 11);
    let state = loaded(state, epoch, 11, envelope(page_of("p11", 1, 12), 11, 37));
    let window = state.view().pagination.expect("pagination").window;
    assert_eq!((window.start, window.end), (11, 20));
    assert!(window.show_first);
    assert!(window.show_last);

    let (state, effects) = update(state, Msg::PrevBlockClicked);
    assert_eq!(fetch_of(&effects).1, 1);
    let state = loaded(state, epoch, 1, envelope(page_of("p1", 1, 12), 1, 37));

    let (_state, effects) = update(state, Msg::PrevBlockClicked);
    assert!(effects.is_empty());
}

#[test]
fn narrow_viewport_shrinks_window() {
    let (state, _) = paged_with_first_page(37);
    let (state, effects) = update(state, Msg::ViewportResized(600));
    assert!(effects.is_empty());
    assert_eq!(state.window_size(), 5);
    let window = state.view().pagination.expect("pagination").window;
    assert_eq!((window.start, window.end), (1, 5));

    let (_state, effects) = update(state, Msg::NextBlockClicked);
    assert_eq!(fetch_of(&effects).1, 6);
}

#[test]
fn out_of_range_and_concurrent_jumps_are_ignored() {
    let (state, _) = paged_with_first_page(3);

    let (state, effects) = update(state, Msg::PageRequested(0));
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::PageRequested(4));
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::PageRequested(2));
    assert_eq!(effects.len(), 1);
    let (state, effects) = update(state, Msg::PageRequested(3));
    assert!(effects.is_empty());
    assert_eq!(state.guard().in_flight_page(), Some(2));
}

#[test]
fn failed_jump_keeps_current_page_and_allows_retry() {
    let (state, epoch) = paged_with_first_page(3);
    let (state, _) = update(state, Msg::PageRequested(2));
    let state = failed(state, epoch, 2, FetchFailure::Network("timeout".into()));

    assert_eq!(state.current_page(), 1);
    assert_eq!(state.listings().len(), 12);
    assert_eq!(state.status(), ControllerStatus::Error);

    let (_state, effects) = update(state, Msg::PageRequested(2));
    assert_eq!(fetch_of(&effects).1, 2);
}

#[test]
fn scroll_is_ignored_in_paged_mode() {
    let (state, _) = paged_with_first_page(3);
    let (_state, effects) = update(state, Msg::ScrollThresholdCrossed);
    assert!(effects.is_empty());
}

#[test]
fn single_page_result_hides_pagination() {
    let (state, _) = paged_with_first_page(1);
    assert_eq!(state.view().pagination, None);
}
