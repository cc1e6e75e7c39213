// Configuration loading tests
// Author: kelexine (https://github.com/kelexine)

use recipe_gateway::config::AppConfig;
use std::io::Write;

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.max_body_bytes, 50 * 1024 * 1024);
    assert!(config
        .server
        .cors_origins
        .contains(&"http://localhost:3000".to_string()));
    assert!(config.auth.api_key.is_empty());
    assert_eq!(config.gemini.model, "gemini-2.5-flash");
    assert_eq!(config.gemini.timeout_seconds, 120);
    assert_eq!(config.image_gen.timeout_seconds, 60);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.gemini.api_base_url, "https://generativelanguage.googleapis.com/v1beta");
}

#[test]
fn test_load_from_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 9090
cors_origins = ["https://recipes.example"]

[auth]
api_key = "front-door"

[gemini]
api_key = "AIza-test"
model = "gemini-2.5-pro"

[image_gen]
api_key = "img"
url = "https://images.example/v1/generate"
"#
    )
    .unwrap();

    let config = AppConfig::load_from(file.path()).unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.cors_origins, vec!["https://recipes.example"]);
    assert_eq!(config.auth.api_key, "front-door");
    assert_eq!(config.gemini.api_key, "AIza-test");
    assert_eq!(config.gemini.model, "gemini-2.5-pro");
    assert_eq!(config.gemini.timeout_seconds, 120);
    assert_eq!(config.image_gen.url, "https://images.example/v1/generate");
}

#[test]
fn test_malformed_file_is_a_config_error() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[server\nport = ").unwrap();

    assert!(AppConfig::load_from(file.path()).is_err());
}
