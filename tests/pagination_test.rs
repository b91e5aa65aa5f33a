//! Collection `view` construction

use ade_bridge::core::pagination::{build_view, PageRequest, QueryParams};
use test_case::test_case;

const PATH: &str = "/locations/be.herd/farm-1/milking-visits";

#[test_case(0, true, false ; "first page")]
#[test_case(2, true, true ; "middle page")]
#[test_case(4, false, true ; "last page")]
fn test_next_and_prev_links(current_page: u64, has_next: bool, has_prev: bool) {
    let query = QueryParams::parse(&format!("currentPage={current_page}&pageSize=20"));
    let page = PageRequest::from_query(&query, 50, 1000).unwrap();
    let view = build_view(PATH, &query, &page, 95);

    assert_eq!(view.total_items, 95);
    assert_eq!(view.total_pages, 5);
    assert_eq!(view.page_size, 20);
    assert_eq!(view.current_page, current_page);
    assert_eq!(view.next.is_some(), has_next);
    assert_eq!(view.prev.is_some(), has_prev);
}

#[test]
fn test_links_keep_other_parameters() {
    let query = QueryParams::parse("meta-modified-from=2023-05-01&currentPage=0&pageSize=20");
    let page = PageRequest::from_query(&query, 50, 1000).unwrap();
    let view = build_view(PATH, &query, &page, 95);

    assert_eq!(
        view.next.as_deref(),
        Some("/locations/be.herd/farm-1/milking-visits?meta-modified-from=2023-05-01&currentPage=1&pageSize=20")
    );
    assert_eq!(
        view.last,
        "/locations/be.herd/farm-1/milking-visits?meta-modified-from=2023-05-01&currentPage=4&pageSize=20"
    );
}

#[test]
fn test_serialized_view_omits_absent_links() {
    let query = QueryParams::parse("currentPage=4&pageSize=20");
    let page = PageRequest::from_query(&query, 50, 1000).unwrap();
    let json = serde_json::to_value(build_view(PATH, &query, &page, 95)).unwrap();

    assert!(json.get("next").is_none());
    assert_eq!(json["totalPages"], 5);
    assert!(json["prev"].as_str().unwrap().contains("currentPage=3"));
}

#[test]
fn test_empty_collection() {
    let query = QueryParams::default();
    let page = PageRequest::from_query(&query, 50, 1000).unwrap();
    let view = build_view(PATH, &query, &page, 0);

    assert_eq!(view.total_pages, 0);
    assert!(view.next.is_none());
    assert!(view.prev.is_none());
}

#[test_case("pageSize=0" ; "zero page size")]
#[test_case("pageSize=5000" ; "above max")]
#[test_case("currentPage=-1" ; "negative page")]
#[test_case("pageSize=ten" ; "not a number")]
fn test_invalid_page_parameters(query: &str) {
    let err = PageRequest::from_query(&QueryParams::parse(query), 50, 1000).unwrap_err();
    assert!(err.is_bad_request());
}
