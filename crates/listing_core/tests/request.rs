use listing_core::{
    build_detail_request, build_request, FilterKey, FilterModel, FilterValue, ListingKey,
    PAGE_SIZE,
};
use pretty_assertions::assert_eq;
use url::Url;

#[test]
fn undefined_filters_are_omitted() {
    let filters: FilterModel = [
        (FilterKey::MinPrice, None),
        (FilterKey::MaxPrice, Some(FilterValue::Number(500000))),
    ]
    .into_iter()
    .collect();

    let request = build_request(&filters, 2, PAGE_SIZE);
    let query = request.query_string();
    assert_eq!(query, "page=2&page_size=12&max_price=500000");
    assert!(!query.contains("min_price"));
    assert!(!query.contains("undefined"));
}

#[test]
fn page_one_has_same_shape_as_other_pages() {
    let filters = FilterModel::new();
    assert_eq!(build_request(&filters, 1, 12).query_string(), "page=1&page_size=12");
    assert_eq!(build_request(&filters, 7, 12).query_string(), "page=7&page_size=12");
    assert_eq!(build_request(&filters, 1, 12).path, build_request(&filters, 7, 12).path);
}

#[test]
fn identical_filters_produce_identical_requests() {
    let a = FilterModel::new()
        .with(FilterKey::PropertyType, "Townhouse")
        .with(FilterKey::MinRooms, 3);
    let b = FilterModel::new()
        .with(FilterKey::MinRooms, 3)
        .with(FilterKey::PropertyType, "Townhouse");
    assert_eq!(build_request(&a, 3, 12), build_request(&b, 3, 12));
    assert_eq!(
        build_request(&a, 3, 12).query_string(),
        "page=3&page_size=12&min_rooms=3&property_type=Townhouse"
    );
}

#[test]
fn values_are_form_encoded() {
    let filters = FilterModel::new()
        .with(FilterKey::PropertyType, "Apartment/Condo")
        .with(FilterKey::City, "North Vancouver");
    assert_eq!(
        build_request(&filters, 1, 12).query_string(),
        "page=1&page_size=12&city=North+Vancouver&property_type=Apartment%2FCondo"
    );
}

#[test]
fn resolves_against_base_url() {
    let base = Url::parse("https://api.example.com/v1/").unwrap();
    let filters = FilterModel::new().with(FilterKey::MaxPrice, 900000);
    let url = build_request(&filters, 2, 12).resolve(&base).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/v1/properties/?page=2&page_size=12&max_price=900000"
    );

    let detail = build_detail_request(&ListingKey::new("262151234"))
        .resolve(&base)
        .unwrap();
    assert_eq!(detail.as_str(), "https://api.example.com/v1/properties/262151234");
}
