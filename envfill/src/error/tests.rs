//! Unit tests for error rendering and classification.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface unexpected results"
)]

use std::error::Error as _;

use rstest::rstest;

use super::*;
use crate::convert::ConvertError;
use crate::validate::{ValidationError, ValidationErrors};

#[rstest]
fn declaration_errors_name_the_field() {
    let err = EnvError::declaration("db", DeclarationError::KeyAndPrefix);
    let message = err.to_string();
    assert!(message.starts_with("field `db`: key and prefix are mutually exclusive"));
    assert!(message.contains("use prefix to populate a nested record"));
    assert_eq!(err.field(), Some("db"));
}

#[rstest]
fn conversion_errors_keep_their_source() {
    let err = EnvError::convert(
        "port",
        "APP_PORT",
        ConvertError::Duration {
            value: "soon".to_owned(),
        },
    );
    assert_eq!(
        err.to_string(),
        "field `port` failed to populate from `APP_PORT`: invalid duration \"soon\""
    );
    let source = err.source().expect("conversion error has a source");
    assert_eq!(source.to_string(), "invalid duration \"soon\"");
}

#[rstest]
fn required_errors_report_the_prefixed_key() {
    let err = EnvError::Required {
        field: "host".to_owned(),
        key: "DB_HOST".to_owned(),
    };
    assert_eq!(
        err.to_string(),
        "required field `host` is missing: `DB_HOST` is not set"
    );
}

#[rstest]
fn validation_errors_belong_to_the_record() {
    let err = EnvError::Validation {
        record: "Config",
        source: ValidationErrors::from(ValidationError::new("port", "must be positive")),
    };
    assert_eq!(err.field(), None);
    assert_eq!(
        err.to_string(),
        "`Config` failed to validate: validation failed: port: must be positive"
    );
}

#[rstest]
fn collector_errors_wrap_arbitrary_sources() {
    let err = EnvError::Collect {
        field: "creds".to_owned(),
        source: "id list is empty".into(),
    };
    assert_eq!(err.field(), Some("creds"));
    assert_eq!(err.to_string(), "collector field `creds` failed: id list is empty");
}

#[rstest]
fn shape_mismatch_names_both_shapes() {
    let err = DeclarationError::ShapeMismatch {
        resolved: "leaf",
        provided: "collector",
    };
    assert_eq!(
        err.to_string(),
        "directives resolve to a leaf but the field provides a collector"
    );
}
