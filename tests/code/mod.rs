use std::time::Duration;

use status_rail::context::Instant;
use status_rail::{Code, Codes, Context};

#[test]
fn unregistered_code_message_is_decimal() {
    let code = Code::new(123_456);
    assert_eq!(code.message(), "123456");
    assert_eq!(code.error_text(), "123456");
    assert_eq!(code.to_string(), "123456");
    assert_eq!(code.http_status(), 200);
}

#[test]
fn canonical_mapping_table() {
    let expected = [
        (Code::OK, 200, ""),
        (Code::CANCELLED, 499, "已取消"),
        (Code::UNKNOWN, 500, "未知错误"),
        (Code::INVALID_ARGUMENT, 400, "非法输入"),
        (Code::DEADLINE_EXCEEDED, 504, "超时错误"),
        (Code::NOT_FOUND, 404, "没找到对象"),
        (Code::ALREADY_EXISTS, 409, "已经存在"),
        (Code::PERMISSION_DENIED, 403, "权限错误"),
        (Code::RESOURCE_EXHAUSTED, 429, "资源耗尽"),
        (Code::FAILED_PRECONDITION, 400, "非预期状态"),
        (Code::ABORTED, 409, "访问拒绝"),
        (Code::OUT_OF_RANGE, 400, "超出范围"),
        (Code::UNIMPLEMENTED, 501, "没有实现"),
        (Code::INTERNAL, 500, "内部错误"),
        (Code::UNAVAILABLE, 503, "不可用"),
        (Code::DATA_LOSS, 500, "数据丢失"),
        (Code::UNAUTHENTICATED, 401, "未通过身份验证"),
    ];

    for (code, http, message) in expected {
        assert_eq!(code.http_status(), http, "http status of {}", code.code());
        assert_eq!(code.message(), message, "message of {}", code.code());
    }
}

#[test]
fn bare_code_carries_no_details_or_context() {
    let code = Code::ALREADY_EXISTS;
    assert!(Codes::details(&code).is_empty());
    assert!(Codes::stack_entries(&code).is_empty());
    assert!(Codes::context(&code).is_background());
}

#[test]
fn context_derivation_promotes_to_status() {
    let (status, cancel) = Code::NOT_FOUND.with_timeout(Duration::from_secs(30));

    assert_eq!(status.code(), 5);
    assert_eq!(status.error_text(), Code::NOT_FOUND.message());
    assert!(status.details().is_empty());
    assert!(status.context().deadline().is_some());
    assert!(!cancel.is_cancelled());
}

#[test]
fn deadline_derivation_promotes_to_status() {
    let deadline = Instant::now() + Duration::from_secs(5);
    let (status, cancel) = Code::UNAVAILABLE.with_deadline(deadline);

    assert_eq!(status.code(), 14);
    assert_eq!(status.error_text(), "不可用");
    assert!(status.stack_entries().is_empty());
    assert_eq!(status.context().deadline(), Some(deadline));
    assert!(!status.context().is_done());

    cancel.cancel();
    assert!(status.context().is_done());
}

#[test]
fn with_value_on_code() {
    let status = Code::INTERNAL.with_value("tenant", std::sync::Arc::new(7_u32));
    assert_eq!(status.context().value::<u32>("tenant"), Some(&7));

    let bound = Code::INTERNAL.with_context(Context::background().with_value("trace", "abc"));
    assert_eq!(bound.context().value::<&str>("trace"), Some(&"abc"));
}

#[test]
fn business_codes_are_negative() {
    assert!(Code::new(-1).is_business());
    assert!(!Code::OK.is_business());
    assert_eq!(i32::from(Code::from(-3)), -3);
}
