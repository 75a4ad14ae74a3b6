use rstest::rstest;

use super::*;

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.limit, 1000);
    assert_eq!(request.offset, 0);
}

#[rstest]
#[case(None, None, 1000, 0)]
#[case(Some("10"), Some("20"), 10, 20)]
#[case(Some("-5"), Some("-1"), 0, 0)]
#[case(Some("abc"), Some(""), 1000, 0)]
#[case(Some(" 25 "), Some("3"), 25, 3)]
fn test_page_request_from_raw(
    #[case] limit: Option<&str>,
    #[case] offset: Option<&str>,
    #[case] expected_limit: u64,
    #[case] expected_offset: u64,
) {
    let request = PageRequest::from_raw(limit, offset);
    assert_eq!(request.limit, expected_limit);
    assert_eq!(request.offset, expected_offset);
}

#[test]
fn test_last_partial_page_has_no_more() {
    // 25 rows, limit 10, offset 20 -> 5 rows returned
    let meta = PageMeta::new(PageRequest::new(10, 20), 5, 25);
    assert!(!meta.has_more);
}

#[test]
fn test_middle_page_has_more() {
    let meta = PageMeta::new(PageRequest::new(10, 10), 10, 25);
    assert!(meta.has_more);
    assert_eq!(meta.total, 25);
    assert_eq!(meta.limit, 10);
    assert_eq!(meta.offset, 10);
}

#[test]
fn test_empty_result_has_no_more() {
    let meta = PageMeta::new(PageRequest::default(), 0, 0);
    assert!(!meta.has_more);
}

#[test]
fn test_page_response_new() {
    let response = PageResponse::new(vec![1, 2, 3], PageRequest::new(3, 0), 7);
    assert_eq!(response.data, vec![1, 2, 3]);
    assert!(response.pagination.has_more);
}

#[test]
fn test_page_meta_serializes_camel_case() {
    let meta = PageMeta::new(PageRequest::new(10, 20), 5, 25);
    let json = serde_json::to_value(meta).expect("should serialize");
    assert_eq!(json["hasMore"], serde_json::json!(false));
    assert_eq!(json["total"], serde_json::json!(25));
}
