use super::*;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
struct TestData {
    name: String,
    value: i32,
}

impl Formattable for TestData {
    fn format_pretty(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
}

fn data() -> TestData {
    TestData {
        name: "test".to_string(),
        value: 42,
    }
}

#[test]
fn test_should_color_explicit_choices() {
    assert!(should_color(ColorChoice::Always));
    assert!(!should_color(ColorChoice::Never));
}

#[test]
fn test_error_line_prefix() {
    assert_eq!(
        error_line("invalid image name"),
        "retag: invalid image name"
    );
}

#[test]
fn test_error_chain_appends_causes() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = libretag::RetagError::config_with_source("failed to read config", None, io_err);
    assert_eq!(
        error_chain(&err),
        "configuration error: failed to read config: no such file"
    );
}

#[test]
fn test_error_chain_without_source() {
    let err = libretag::RetagError::manifest_fetch_failed("404 Not Found");
    assert_eq!(error_chain(&err), "failed to pull manifest: 404 Not Found");
}

#[test]
fn test_format_pretty() {
    let result = format_output(&data(), OutputFormat::Pretty);
    assert_eq!(result.unwrap(), "test: 42");
}

#[test]
fn test_format_json() {
    let result = format_output(&data(), OutputFormat::Json);
    let json: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
    assert_eq!(json["name"], "test");
    assert_eq!(json["value"], 42);
}

#[test]
fn test_format_yaml() {
    let result = format_output(&data(), OutputFormat::Yaml).unwrap();
    assert!(result.contains("name: test"));
    assert!(result.contains("value: 42"));
}
