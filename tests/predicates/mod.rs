use std::sync::Arc;
use std::time::Duration;

use status_rail::{
    check_error, check_ok, context, equal, equal_error, is_error, is_nil_codes, is_ok, safe_code,
    with_cancel, with_context, with_timeout, with_value, Code, Codes, Context, Status,
};

#[test]
fn absent_values_are_ok() {
    assert!(is_nil_codes(None));
    assert!(is_ok(None));
    assert!(check_ok(None));
    assert!(!is_error(None));
    assert_eq!(safe_code(None).code(), 0);
}

#[test]
fn present_values_compare_by_code() {
    let status = Status::new(Code::OK, "fine");
    assert!(!is_nil_codes(Some(&status)));
    assert!(is_ok(Some(&status)));

    let failed = Status::new(Code::INTERNAL, "not fine");
    assert!(is_error(Some(&failed)));
    assert!(check_error(Some(&failed)));
    assert!(equal(Some(&failed), Some(&Code::INTERNAL)));
    assert!(!equal(Some(&failed), None));
    assert!(equal(None, Some(&Code::OK)));
}

#[test]
fn optional_status_reads_as_ok_when_absent() {
    let maybe: Option<Status> = None;
    assert!(is_ok(maybe.as_ref().map(|s| s as &dyn Codes)));
}

#[test]
fn equal_error_uses_canonical_cause() {
    assert!(equal_error(&Code::OK, None));
    assert!(!equal_error(&Code::OK, Some(&std::io::Error::other("1"))));
    assert!(equal_error(&Code::CANCELLED, Some(&std::io::Error::other("1"))));
}

#[test]
fn context_helpers_treat_absent_as_ok() {
    assert!(context(None).is_background());

    let bound = with_context(None, Context::background().with_value("k", 1_i32));
    assert_eq!(bound.code(), 0);
    assert_eq!(bound.context().value::<i32>("k"), Some(&1));

    let (status, cancel) = with_cancel(Some(&Code::ABORTED));
    cancel.cancel();
    assert_eq!(status.code(), 10);
    assert!(status.context().is_done());

    let (status, _cancel) = with_timeout(None, Duration::from_secs(1));
    assert!(status.context().deadline().is_some());

    let status = with_value(Some(&Code::UNKNOWN), "attempt", Arc::new(3_u8));
    assert_eq!(status.context().value::<u8>("attempt"), Some(&3));
}
