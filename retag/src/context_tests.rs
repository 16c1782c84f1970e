use super::*;
use std::io::Write;

fn no_env() -> Option<EnvOverrides> {
    Some(EnvOverrides::new())
}

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", contents).unwrap();
    path
}

#[test]
fn test_verbosity_from_count() {
    assert_eq!(VerbosityLevel::from_count(0), VerbosityLevel::Quiet);
    assert_eq!(VerbosityLevel::from_count(1), VerbosityLevel::Info);
    assert_eq!(VerbosityLevel::from_count(2), VerbosityLevel::Debug);
    assert_eq!(VerbosityLevel::from_count(3), VerbosityLevel::Trace);
    assert_eq!(VerbosityLevel::from_count(9), VerbosityLevel::Trace);
}

#[test]
fn test_verbosity_filter() {
    assert_eq!(VerbosityLevel::Quiet.as_filter(), "warn");
    assert_eq!(VerbosityLevel::Trace.as_filter(), "trace");
}

#[test]
fn test_build_uses_defaults() {
    let ctx = AppContext::build_with_env(&Settings::default(), None, no_env()).unwrap();
    assert_eq!(ctx.config, Config::default());
    assert_eq!(ctx.format, OutputFormat::Pretty);
}

#[test]
fn test_build_reads_fallback_file_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "registry:\n  url: http://localhost:5000\n");

    let ctx = AppContext::build_with_env(&Settings::default(), Some(&path), no_env()).unwrap();
    assert_eq!(ctx.config.registry.url, "http://localhost:5000");
}

#[test]
fn test_build_ignores_missing_fallback_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let ctx = AppContext::build_with_env(&Settings::default(), Some(&path), no_env()).unwrap();
    assert_eq!(ctx.config, Config::default());
}

#[test]
fn test_build_requires_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        config_path: Some(dir.path().join("missing.yaml")),
        ..Settings::default()
    };

    let result = AppContext::build_with_env(&settings, None, no_env());
    assert!(matches!(result, Err(libretag::RetagError::Config { .. })));
}

#[test]
fn test_explicit_file_wins_over_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let fallback = write_config(dir.path(), "network:\n  timeout: 10\n");
    let explicit_dir = tempfile::tempdir().unwrap();
    let explicit = write_config(explicit_dir.path(), "network:\n  timeout: 20\n");

    let settings = Settings {
        config_path: Some(explicit),
        ..Settings::default()
    };
    let ctx = AppContext::build_with_env(&settings, Some(&fallback), no_env()).unwrap();
    assert_eq!(ctx.config.network.timeout, 20);
}

#[test]
fn test_precedence_file_env_cli() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "registry:\n  url: http://file:5000\n  auth_url: http://file:5001/token\nnetwork:\n  timeout: 10\n",
    );
    let env: EnvOverrides = [
        ("RETAG_REGISTRY__URL".to_string(), "http://env:5000".to_string()),
        ("RETAG_NETWORK__TIMEOUT".to_string(), "15".to_string()),
    ]
    .into_iter()
    .collect();
    let settings = Settings {
        timeout: Some(45),
        ..Settings::default()
    };

    let ctx = AppContext::build_with_env(&settings, Some(&path), Some(env)).unwrap();

    // File only
    assert_eq!(ctx.config.registry.auth_url, "http://file:5001/token");
    // Env over file
    assert_eq!(ctx.config.registry.url, "http://env:5000");
    // CLI over env
    assert_eq!(ctx.config.network.timeout, 45);
}

#[test]
fn test_cli_overrides_endpoints() {
    let settings = Settings {
        registry: Some("http://localhost:5000".to_string()),
        auth_url: Some("http://localhost:5001/token".to_string()),
        format: OutputFormat::Json,
        ..Settings::default()
    };

    let ctx = AppContext::build_with_env(&settings, None, no_env()).unwrap();
    assert_eq!(ctx.config.registry.url, "http://localhost:5000");
    assert_eq!(ctx.config.registry.auth_url, "http://localhost:5001/token");
    assert_eq!(ctx.format, OutputFormat::Json);
}

#[test]
fn test_cli_zero_timeout_is_rejected() {
    let settings = Settings {
        timeout: Some(0),
        ..Settings::default()
    };
    assert!(AppContext::build_with_env(&settings, None, no_env()).is_err());
}

#[test]
fn test_default_config_path_is_yaml() {
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("retag/config.yaml"));
    }
}
