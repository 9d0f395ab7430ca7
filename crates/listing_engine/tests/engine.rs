use std::time::Duration;

use listing_core::{build_request, Epoch, FilterModel, ListingKey, PAGE_SIZE};
use listing_engine::{parse_base_url, EngineEvent, EngineHandle, FailureKind, FetchSettings};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn base_url_gets_trailing_slash() {
    let url = parse_base_url("https://api.example.com/v1").unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/v1/");
    assert!(parse_base_url("not a url").is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn page_events_carry_epoch_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/properties/"))
        .and(query_param("page", "3"))
        .and(query_param("page_size", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{ "Data": [{ "ListingKey": "E1" }], "CurrentPage": 3, "TotalPages": 3 }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(&server.uri(), FetchSettings::default()).unwrap();
    let epoch = Epoch::default();
    engine.fetch_page(epoch, 3, build_request(&FilterModel::new(), 3, PAGE_SIZE));

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::PageFetched {
            epoch: got_epoch,
            page,
            result,
        }) => {
            assert_eq!(got_epoch, epoch);
            assert_eq!(page, 3);
            let response = result.expect("page ok");
            assert_eq!(response.records[0].key.as_str(), "E1");
            assert_eq!(response.total_pages, Some(3));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_page_becomes_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/properties/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(&server.uri(), FetchSettings::default()).unwrap();
    engine.fetch_page(
        Epoch::default(),
        1,
        build_request(&FilterModel::new(), 1, PAGE_SIZE),
    );

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::PageFetched { result, .. }) => {
            let err = result.unwrap_err();
            assert_eq!(err.kind, FailureKind::Decode);
            assert!(matches!(
                err.to_failure(),
                listing_core::FetchFailure::Parse(_)
            ));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn detail_events_carry_listing_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/properties/K9"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{ "ListingKey": "K9", "Data": { "City": "Surrey" }, "MediaNames": [] }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(&format!("{}/", server.uri()), FetchSettings::default())
        .unwrap();
    engine.fetch_detail(ListingKey::new("K9"));

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::DetailFetched {
            listing_key,
            result,
        }) => {
            assert_eq!(listing_key.as_str(), "K9");
            let detail = result.expect("detail ok");
            assert_eq!(detail.listing.city, "Surrey");
            assert_eq!(detail.gallery_images, vec![listing_core::DEFAULT_MEDIA_URL.to_string()]);
        }
        other => panic!("unexpected event {other:?}"),
    }
}
