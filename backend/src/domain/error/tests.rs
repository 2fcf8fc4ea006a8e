//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::insufficient_funds("broke"), ErrorCode::InsufficientFunds)]
#[case(Error::already_refunded("twice"), ErrorCode::AlreadyRefunded)]
#[case(Error::storage_failure("disk"), ErrorCode::StorageFailure)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn missing_names_resource_in_details() {
    let error = Error::missing(ResourceKind::Transaction, "1700000000000-abc123");
    assert_eq!(error.message(), "transaction 1700000000000-abc123 not found");
    assert_eq!(
        error.details(),
        Some(&json!({ "resource": "transaction", "id": "1700000000000-abc123" }))
    );
}

#[rstest]
fn serialises_with_snake_case_code_and_camel_case_fields(expected_trace_id: String) {
    let error = Error::insufficient_funds("balance too low")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "total": 12 }));
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "insufficient_funds",
            "message": "balance too low",
            "traceId": expected_trace_id,
            "details": { "total": 12 },
        })
    );
}

#[rstest]
fn deserialises_without_optional_fields() {
    let error: Error =
        serde_json::from_value(json!({ "code": "already_refunded", "message": "again" }))
            .expect("deserialise error");
    assert_eq!(error.code(), ErrorCode::AlreadyRefunded);
    assert!(error.trace_id().is_none());
    assert!(error.details().is_none());
}
