use engine_logging::engine_debug;

use crate::state::{ContinuationMode, FetchPhase};
use crate::store::MergeMode;
use crate::window::{next_block_target, prev_block_target, window_size_for_viewport};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Opened => {
            if state.has_started() {
                Vec::new()
            } else {
                let filters = state.filters().clone();
                state.start_epoch(filters)
            }
        }
        Msg::FiltersApplied(filters) => {
            if state.has_started() && &filters == state.filters() {
                engine_debug!("Filters unchanged; staying in epoch {}", state.epoch());
                Vec::new()
            } else {
                state.start_epoch(filters)
            }
        }
        Msg::RetryRequested => {
            let filters = state.filters().clone();
            state.start_epoch(filters)
        }
        Msg::ScrollThresholdCrossed => continue_scroll(&mut state),
        Msg::PageRequested(page) => jump_to_page(&mut state, page),
        Msg::PrevBlockClicked => {
            let target = prev_block_target(state.current_page(), state.window_size());
            block_jump(&mut state, target)
        }
        Msg::NextBlockClicked => {
            let target = next_block_target(
                state.current_page(),
                state.total_pages(),
                state.window_size(),
            );
            block_jump(&mut state, target)
        }
        Msg::ViewportResized(width) => {
            state.set_window_size(window_size_for_viewport(width));
            Vec::new()
        }
        Msg::PageLoaded {
            epoch,
            page,
            result,
        } => {
            if epoch != state.epoch() {
                engine_debug!(
                    "Discarded page {} from stale epoch {} (current {})",
                    page,
                    epoch,
                    state.epoch()
                );
            } else if !state.apply_page_result(page, result) {
                engine_debug!("Discarded unexpected page {} in epoch {}", page, epoch);
            }
            Vec::new()
        }
    };

    (state, effects)
}

/// Sequential continuation: append the page after the current one.
fn continue_scroll(state: &mut AppState) -> Vec<Effect> {
    if state.mode() != ContinuationMode::InfiniteScroll || !state.has_started() {
        engine_debug!("Scroll continuation ignored in {:?} mode", state.mode());
        return Vec::new();
    }
    if !state.has_more() {
        engine_debug!("Scroll continuation ignored; epoch {} exhausted", state.epoch());
        return Vec::new();
    }
    let Some(target) = state.current_page().checked_add(1) else {
        engine_debug!(
            "Scroll continuation ignored; page {} is the last addressable page",
            state.current_page()
        );
        return Vec::new();
    };
    state
        .begin_fetch(target, MergeMode::Append, FetchPhase::FetchingMore)
        .into_iter()
        .collect()
}

/// Prev/Next do nothing at the respective ends of the result set.
fn block_jump(state: &mut AppState, target: u32) -> Vec<Effect> {
    if target == state.current_page() {
        return Vec::new();
    }
    jump_to_page(state, target)
}

/// Discrete navigation: replace the visible page with `page`.
fn jump_to_page(state: &mut AppState, page: u32) -> Vec<Effect> {
    if state.mode() != ContinuationMode::Paged || !state.has_started() {
        engine_debug!("Page jump ignored in {:?} mode", state.mode());
        return Vec::new();
    }
    if page < 1 || page > state.total_pages() {
        engine_debug!(
            "Page jump to {} ignored; {} pages available",
            page,
            state.total_pages()
        );
        return Vec::new();
    }
    if state.guard().is_in_flight() {
        engine_debug!("Page jump to {} ignored; a fetch is in flight", page);
        return Vec::new();
    }
    // A jump breaks the sequential assumption behind the fetched-page set.
    state.forget_fetched_pages();
    let phase = if page == 1 {
        FetchPhase::FetchingInitial
    } else {
        FetchPhase::FetchingMore
    };
    state
        .begin_fetch(page, MergeMode::Replace, phase)
        .into_iter()
        .collect()
}
