use super::*;
use std::error::Error;

#[test]
fn test_resolution_error_messages() {
    assert_eq!(RetagError::InvalidArguments.to_string(), "invalid arguments");
    assert_eq!(
        RetagError::InvalidImageName {
            name: "org//example".to_string()
        }
        .to_string(),
        "invalid image name"
    );
    assert_eq!(
        RetagError::InvalidSourceReference {
            reference: "::1.2.3".to_string()
        }
        .to_string(),
        "invalid source reference"
    );
    assert_eq!(
        RetagError::InvalidTargetReference {
            reference: "@abc".to_string()
        }
        .to_string(),
        "invalid target reference"
    );
}

#[test]
fn test_authentication_failed_wraps_status_line() {
    let err = RetagError::authentication_failed("401 Unauthorized");
    assert!(matches!(err, RetagError::AuthenticationFailed { .. }));
    assert_eq!(err.to_string(), "failed to authenticate: 401 Unauthorized");
}

#[test]
fn test_manifest_fetch_failed_wraps_status_line() {
    let err = RetagError::manifest_fetch_failed("404 Not Found");
    assert_eq!(err.to_string(), "failed to pull manifest: 404 Not Found");
}

#[test]
fn test_manifest_publish_failed_wraps_status_line() {
    let err = RetagError::manifest_publish_failed("400 Bad Request");
    assert_eq!(err.to_string(), "failed to push manifest: 400 Bad Request");
}

#[test]
fn test_missing_credential_names_variable() {
    let err = RetagError::missing_credential("DOCKER_USER");
    assert_eq!(err.to_string(), "DOCKER_USER not found in environment");
    assert!(!err.is_resolution_error());
}

#[test]
fn test_network_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = RetagError::network_with_source("failed to connect", io_err);

    assert!(err.to_string().contains("failed to connect"));
    assert!(err.source().is_some());
}

#[test]
fn test_network_error_without_source() {
    let err = RetagError::network("timed out");
    assert!(err.source().is_none());
}

#[test]
fn test_config_error_keeps_path() {
    let err = RetagError::config("bad file", Some("/etc/retag.yaml"));
    match err {
        RetagError::Config { path, source, .. } => {
            assert_eq!(path, Some("/etc/retag.yaml".to_string()));
            assert!(source.is_none());
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err = RetagError::config_with_source("failed to read", None, io_err);
    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("configuration error"));
}

#[test]
fn test_is_resolution_error() {
    assert!(RetagError::InvalidArguments.is_resolution_error());
    assert!(
        RetagError::InvalidTargetReference {
            reference: String::new()
        }
        .is_resolution_error()
    );
    assert!(!RetagError::authentication_failed("403 Forbidden").is_resolution_error());
    assert!(!RetagError::network("boom").is_resolution_error());
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RetagError>();
}
