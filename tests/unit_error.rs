use std::path::PathBuf;

use togo::error::{exit_codes, Error, JsonError};

#[test]
fn exit_codes_map_correctly() {
    let user = Error::InvalidInput("bad".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    let missing = Error::NoMatch("zebra".to_string());
    assert_eq!(missing.exit_code(), exit_codes::USER_ERROR);
    assert!(missing.is_not_found());

    let fault = Error::CorruptStore {
        path: PathBuf::from("todos.json"),
        reason: "expected value".to_string(),
    };
    assert_eq!(fault.exit_code(), exit_codes::STORAGE_FAULT);
    assert!(fault.is_storage_fault());

    assert_eq!(Error::Cancelled.exit_code(), exit_codes::SUCCESS);
}

#[test]
fn json_error_includes_candidates() {
    let err = Error::AmbiguousMatch {
        input: "buy".to_string(),
        candidates: vec!["Buy milk (1)".to_string(), "Buy bread (2)".to_string()],
    };
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::USER_ERROR);
    assert!(json.error.contains("multiple tasks match"));
    let details = json.details.expect("details");
    assert_eq!(details["candidates"][1], "Buy bread (2)");
}

#[test]
fn io_errors_are_storage_faults() {
    let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
    assert_eq!(err.exit_code(), exit_codes::STORAGE_FAULT);
    assert!(!err.is_not_found());
}
