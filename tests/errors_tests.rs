use std::error::Error;

use daily_idioms::errors::{AcquireError, DeliveryError, PipelineError, SourceError};

#[test]
fn test_source_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = SourceError::EmptyResultSet;
    assert_error(&error);
}

#[test]
fn test_source_error_display() {
    let error = SourceError::Http("connection refused".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: connection refused"
    );

    let error = SourceError::MissingField("meaning");
    assert_eq!(format!("{error}"), "Required field `meaning` is missing or empty");

    let error = SourceError::EmptyResultSet;
    assert_eq!(format!("{error}"), "Content source returned no candidates");
}

#[test]
fn test_source_error_from_serde_json() {
    let parse_err = serde_json::from_str::<serde_json::Value>("not json")
        .expect_err("input is not valid JSON");
    let source_err: SourceError = parse_err.into();

    match source_err {
        SourceError::MalformedResponse(_) => {}
        other => panic!("Unexpected error type: {other:?}"),
    }

    // Verify the From<reqwest::Error> conversion exists without needing to
    // construct a reqwest error.
    #[allow(unused)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> SourceError {
        SourceError::from(err)
    }
}

#[test]
fn test_acquire_error_aggregates_causes() {
    let error = AcquireError {
        slot: 1,
        attempts: 5,
        causes: vec![
            "Failed to send HTTP request: timeout".to_string(),
            "`Mager` was sent recently".to_string(),
        ],
    };

    let message = format!("{error}");
    assert!(message.contains("item 1 after 5 attempts"));
    assert!(message.contains("timeout"));
    assert!(message.contains("`Mager` was sent recently"));
}

#[test]
fn test_delivery_error_display() {
    let error = DeliveryError::Rejected {
        status: 404,
        body: "Unknown Webhook".to_string(),
    };
    assert_eq!(
        format!("{error}"),
        "Webhook rejected message with status 404: Unknown Webhook"
    );
}

#[test]
fn test_pipeline_error_is_transparent() {
    let acquire = AcquireError {
        slot: 0,
        attempts: 5,
        causes: vec!["Content source returned no candidates".to_string()],
    };
    let pipeline: PipelineError = acquire.into();
    assert!(format!("{pipeline}").contains("after 5 attempts"));

    let delivery = DeliveryError::Http("dns failure".to_string());
    let pipeline: PipelineError = delivery.into();
    assert_eq!(
        format!("{pipeline}"),
        "Failed to send HTTP request: dns failure"
    );
}
