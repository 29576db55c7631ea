#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use arlimit_core::errors::LimitError;
use arlimit_core::logging_facility::test_capture::init_test_capture;
use arlimit_core::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ADDED_LEN, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND,
};
use arlimit_core::{log_op_end, log_op_error, log_op_start};
use common::{limits, reconciler_with};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for_op(op_name);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(
        end_events[0].fields.get(FIELD_DURATION_MS),
        Some(&"42".to_string())
    );
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = LimitError::MissingFile {
        path: "ar.conf".to_string(),
    };
    log_op_error!(op_name, &err, duration_ms = 10);

    let error_events = capture.events_for_op(op_name);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(
        error_events[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_NOT_FOUND".to_string())
    );
    assert_eq!(
        error_events[0].fields.get(FIELD_ERR_KIND),
        Some(&"NotFound".to_string())
    );
}

#[test]
fn test_update_limits_logs_start_and_end_error_on_violation() {
    let capture = init_test_capture();
    let mut r = reconciler_with(&[("logscan0", Some(1))], Some(10), &[]);

    let before_errors = capture.count_events(|e| {
        e.op.as_deref() == Some("update_limits") && e.event.as_deref() == Some(EVENT_END_ERROR)
    });
    let result = r.update_limits(&limits(&[("logscan0", Some(11))]));
    assert!(result.is_err());

    let after_errors = capture.count_events(|e| {
        e.op.as_deref() == Some("update_limits")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.fields.get(FIELD_ERR_CODE).map(String::as_str) == Some("ERR_CONSTRAINT_VIOLATION")
    });
    assert!(after_errors > before_errors);
    capture.assert_event_exists("update_limits", EVENT_START);
}

#[test]
fn test_initialize_reports_added_commands() {
    let capture = init_test_capture();

    let _r = reconciler_with(&[], Some(5), &["logonly-a0", "logonly-b0", "logonly-c0"]);

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some("initialize")
            && e.event.as_deref() == Some(EVENT_END)
            && e.fields.get(FIELD_ADDED_LEN).map(String::as_str) == Some("3")
    });
    assert!(found >= 1, "initialize end event should report added_len=3");
}
