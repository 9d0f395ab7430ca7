#![allow(dead_code)]

use std::sync::Once;

use listing_core::{
    update, AppState, Effect, Epoch, FetchFailure, Msg, PageResponse, RawListing,
};
use serde_json::json;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn raw(key: &str) -> RawListing {
    RawListing::from_value(json!({
        "ListingKey": key,
        "NewListing": false,
        "Data": { "City": "Vancouver", "ListPrice": 650000 },
        "Media": [{ "MediaURL": "https://cdn.example.com/", "MediaName": format!("{key}.jpg") }]
    }))
    .expect("raw listing")
}

/// Keys `{prefix}-{from}` ..= `{prefix}-{to}`.
pub fn page_of(prefix: &str, from: u32, to: u32) -> Vec<RawListing> {
    (from..=to).map(|n| raw(&format!("{prefix}-{n}"))).collect()
}

pub fn envelope(records: Vec<RawListing>, current: u32, total: u32) -> PageResponse {
    PageResponse {
        records,
        skipped: 0,
        current_page: Some(current),
        total_pages: Some(total),
    }
}

pub fn fetch_of(effects: &[Effect]) -> (Epoch, u32, String) {
    match effects {
        [Effect::FetchPage {
            epoch,
            page,
            request,
        }] => (*epoch, *page, request.query_string()),
        other => panic!("expected one fetch effect, got {other:?}"),
    }
}

pub fn loaded(state: AppState, epoch: Epoch, page: u32, response: PageResponse) -> AppState {
    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            epoch,
            page,
            result: Ok(response),
        },
    );
    assert!(effects.is_empty());
    state
}

pub fn failed(state: AppState, epoch: Epoch, page: u32, failure: FetchFailure) -> AppState {
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            epoch,
            page,
            result: Err(failure),
        },
    );
    state
}

pub fn keys(state: &AppState) -> Vec<String> {
    state
        .listings()
        .iter()
        .map(|listing| listing.key.to_string())
        .collect()
}
