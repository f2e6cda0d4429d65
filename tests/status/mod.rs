use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};
use status_rail::{
    errorf, Code, Codes, Coded, DebugInfo, DetailMessage, Envelope, Status, StatusRecord,
};

#[derive(Debug, Deserialize)]
struct Flaky {
    fail: bool,
}

impl Serialize for Flaky {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.fail {
            return Err(serde::ser::Error::custom("refusing to encode"));
        }
        serializer.serialize_bool(self.fail)
    }
}

impl DetailMessage for Flaky {
    const TYPE_URL: &'static str = "type.example.com/test.Flaky";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct QuotaFailure {
    subject: String,
}

impl DetailMessage for QuotaFailure {
    const TYPE_URL: &'static str = "type.example.com/test.QuotaFailure";
}

#[test]
fn new_status_overrides_registered_message() {
    let status = Status::new(Code::NOT_FOUND, "user 9 missing");

    assert_eq!(status.code(), 5);
    assert_eq!(status.error_text(), "user 9 missing");
    assert_eq!(status.to_string(), "user 9 missing");
    assert_eq!(status.message(), "没找到对象");
    assert_eq!(status.http_status(), 404);
}

#[test]
fn captures_call_site() {
    let status = Status::new(Code::INTERNAL, "boom");
    let entries = status.stack_entries();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].detail, "boom");
    let first = entries[0].stack_entries.first().cloned().unwrap_or_default();
    assert!(first.contains("captures_call_site"), "unexpected first frame: {first}");
}

#[test]
fn from_code_uses_registered_message() {
    let status = Status::from_code(Code::UNAVAILABLE);

    assert_eq!(status.error_text(), "不可用");
    assert_eq!(status.stack_entries().len(), 1);
    assert_eq!(status.stack_entries()[0].detail, "");
}

#[test]
fn errorf_formats_message() {
    let status = errorf!(Code::OUT_OF_RANGE, "offset {} past end {}", 12, 10);
    assert_eq!(status.error_text(), "offset 12 past end 10");
    assert_eq!(status.code(), 11);
}

#[test]
fn details_survive_context_derivation() {
    let mut status = Status::new(Code::RESOURCE_EXHAUSTED, "quota");
    status
        .with_details(&[
            QuotaFailure { subject: "project:a".into() },
            QuotaFailure { subject: "project:b".into() },
        ])
        .unwrap();
    let before = status.details().to_vec();
    assert_eq!(before.len(), 3);

    let (derived, _cancel) = status.with_timeout(Duration::from_secs(5));
    assert_eq!(derived.details(), before.as_slice());
    assert!(Status::ptr_eq(&derived, &status));
    assert_eq!(
        derived.details()[2].unpack::<QuotaFailure>().unwrap(),
        Some(QuotaFailure { subject: "project:b".into() })
    );
}

#[test]
fn with_details_keeps_prefix_on_failure() {
    let mut status = Status::new(Code::DATA_LOSS, "corrupt block");
    let err = status
        .with_details(&[Flaky { fail: false }, Flaky { fail: true }, Flaky { fail: false }])
        .unwrap_err();

    assert_eq!(err.type_url(), Flaky::TYPE_URL);
    assert!(err.to_string().contains("refusing to encode"));
    // stack capture + the first flaky detail
    assert_eq!(status.details().len(), 2);
}

#[test]
fn merge_stack_entries_appends_prefixed_annotations() {
    let inner = Status::new(Code::NOT_FOUND, "row missing").with_stack_entries("lookup");
    assert_eq!(inner.stack_entries().len(), 2);

    let outer = Status::new(Code::INTERNAL, "handler failed").merge_stack_entries(&inner);
    let entries = outer.stack_entries();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].detail, "handler failed");
    assert_eq!(entries[1].detail, ":5|没找到对象|row missing");
    assert_eq!(entries[2].detail, ":5|没找到对象|lookup");
}

#[test]
fn merging_a_bare_code_adds_nothing() {
    let outer =
        Status::new(Code::INTERNAL, "handler failed").merge_stack_entries(&Code::NOT_FOUND);
    assert_eq!(outer.stack_entries().len(), 1);
}

#[test]
fn from_proto_with_empty_message_is_bare_code() {
    let coded = Status::from_proto(StatusRecord { code: 5, ..Default::default() });

    assert!(coded.is_bare_code());
    assert_eq!(coded, Code::NOT_FOUND);
    assert_eq!(coded.message(), "没找到对象");
    assert_eq!(coded.error_text(), "没找到对象");
}

#[test]
fn from_proto_with_message_is_status() {
    let coded =
        Status::from_proto(StatusRecord { code: 5, message: "boom".into(), ..Default::default() });

    let status = coded.as_status().expect("status variant");
    assert_eq!(status.error_text(), "boom");
    assert_eq!(coded.to_string(), "boom");
    assert!(status.details().is_empty());
}

#[test]
fn from_any_rejects_foreign_envelopes() {
    let foreign = Envelope::pack(&DebugInfo::default()).unwrap();
    let coded = Status::from_any(&foreign);

    assert_eq!(coded, Code::INTERNAL);
    assert!(coded
        .error_text()
        .starts_with("invalid proto message get type.googleapis.com/google.rpc.DebugInfo"));
}

#[test]
fn wire_record_round_trips_through_envelope() {
    let mut status = Status::new(Code::ABORTED, "conflict");
    status.with_details(&[QuotaFailure { subject: "row:1".into() }]).unwrap();

    let envelope = status.to_any().unwrap();
    let json = serde_json::to_string(status.proto()).unwrap();
    let decoded: StatusRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(&decoded, status.proto());
    match Status::from_any(&envelope) {
        Coded::Status(restored) => {
            assert_eq!(restored.code(), 10);
            assert_eq!(restored.error_text(), "conflict");
            assert_eq!(restored.details(), status.details());
        },
        Coded::Code(code) => panic!("expected status, got bare code {code:?}"),
    }
}

#[test]
fn equal_compares_canonical_codes() {
    let status = Status::new(Code::UNAUTHENTICATED, "token expired");
    let same = Code::UNAUTHENTICATED;
    let plain = std::io::Error::other("16");

    assert!(status.equal(Some(&same)));
    assert!(status.equal(Some(&plain)));
    assert!(!status.equal(None));
}

#[test]
fn into_proto_returns_record() {
    let status = Status::new(Code::CANCELLED, "client went away");
    let record = status.into_proto();

    assert_eq!(record.code, 1);
    assert_eq!(record.message, "client went away");
    assert_eq!(record.details.len(), 1);
}
