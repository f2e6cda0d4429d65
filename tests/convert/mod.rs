use std::error::Error;
use std::fmt;

use status_rail::{
    as_int, cause, from_error, parse_string, wrap_codes, Code, Codes, Coded, Status,
};

#[derive(Debug)]
struct Annotated {
    what: &'static str,
    source: Box<dyn Error + Send + Sync + 'static>,
}

impl fmt::Display for Annotated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.what, self.source)
    }
}

impl Error for Annotated {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}

#[test]
fn cause_of_nothing_is_ok() {
    let coded = cause(None);
    assert_eq!(coded.code(), 0);
    assert_eq!(coded.message(), "");
}

#[test]
fn cause_parses_plain_error_text() {
    let plain = std::io::Error::other("123");
    assert_eq!(cause(Some(&plain)).code(), 123);

    let garbage = std::io::Error::other("disk on fire");
    assert_eq!(cause(Some(&garbage)), Code::INVALID_ARGUMENT);
}

#[test]
fn cause_returns_coded_root_unchanged() {
    let status = Status::new(Code::PERMISSION_DENIED, "no export rights");
    let err = Annotated { what: "exporting report", source: Box::new(status.clone()) };

    let coded = cause(Some(&err));
    let found = coded.as_status().expect("status root");
    assert!(Status::ptr_eq(found, &status));
    assert_eq!(found.stack_entries(), status.stack_entries());
}

#[test]
fn parse_string_cases() {
    assert_eq!(parse_string(""), Code::OK);
    assert_eq!(parse_string("123").code(), 123);
    assert_eq!(parse_string("-42").code(), -42);
    assert_eq!(parse_string("abc"), Code::INVALID_ARGUMENT);
    assert_eq!(as_int(77), Code::new(77));
}

#[test]
fn wrap_codes_passes_status_through() {
    let status = Status::new(Code::ABORTED, "lost race");
    let wrapped = wrap_codes(status.clone());
    assert!(Status::ptr_eq(&wrapped, &status));
    assert_eq!(wrapped.stack_entries().len(), 1);
}

#[test]
fn wrap_codes_promotes_bare_code_with_fresh_stack() {
    let wrapped = wrap_codes(Code::DEADLINE_EXCEEDED);

    assert_eq!(wrapped.code(), 4);
    assert_eq!(wrapped.error_text(), "超时错误");
    let entries = wrapped.stack_entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]
        .stack_entries
        .first()
        .is_some_and(|frame| frame.contains("wrap_codes_promotes_bare_code_with_fresh_stack")));
}

#[test]
fn from_error_handles_nothing_coded_and_plain() {
    assert_eq!(from_error(None, Code::INTERNAL), Code::OK);

    let coded_root = Annotated { what: "loading", source: Box::new(Code::NOT_FOUND) };
    assert!(matches!(from_error(Some(&coded_root), Code::INTERNAL), Coded::Code(Code::NOT_FOUND)));

    let plain = std::io::Error::other("connection reset");
    let coded = from_error(Some(&plain), Code::UNAVAILABLE);
    assert_eq!(coded.code(), 14);
    assert_eq!(coded.error_text(), "connection reset");
    assert_eq!(coded.stack_entries().len(), 1);
}

#[test]
fn from_error_keeps_wrapper_text_for_uncoded_chains() {
    let err = Annotated { what: "syncing", source: Box::new(std::io::Error::other("timeout")) };
    let coded = from_error(Some(&err), Code::UNKNOWN);
    assert_eq!(coded.error_text(), "syncing: timeout");
}
