use axum::http::{HeaderMap, HeaderValue};
use staygenie::infrastructure::observability::{REQUEST_ID_HEADER, RequestId};

fn headers_with(raw: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(raw).unwrap());
    headers
}

fn assert_generated(id: &RequestId) {
    assert!(uuid::Uuid::parse_str(id.as_str()).is_ok(), "{id} is not a uuid");
}

#[test]
fn given_caller_id_when_reading_headers_then_keeps_it_trimmed() {
    let id = RequestId::from_headers(&headers_with("  trace-abc-123 "));

    assert_eq!(id.as_str(), "trace-abc-123");
}

#[test]
fn given_missing_header_when_reading_headers_then_generates_uuid() {
    let id = RequestId::from_headers(&HeaderMap::new());

    assert_generated(&id);
}

#[test]
fn given_blank_header_when_reading_headers_then_generates_uuid() {
    assert_generated(&RequestId::from_headers(&headers_with("   ")));
}

#[test]
fn given_overlong_header_when_reading_headers_then_replaces_it() {
    let id = RequestId::from_headers(&headers_with(&"a".repeat(129)));

    assert_generated(&id);
}

#[test]
fn given_header_at_length_limit_when_reading_headers_then_keeps_it() {
    let raw = "a".repeat(128);

    assert_eq!(RequestId::from_headers(&headers_with(&raw)).as_str(), raw);
}

#[test]
fn given_inner_whitespace_when_reading_headers_then_replaces_it() {
    let id = RequestId::from_headers(&headers_with("trace abc"));

    assert_generated(&id);
}

#[test]
fn given_two_generated_ids_when_comparing_then_differ() {
    assert_ne!(RequestId::generate(), RequestId::generate());
}
