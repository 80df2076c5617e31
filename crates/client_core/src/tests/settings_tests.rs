use super::*;
use std::{collections::HashMap, path::PathBuf};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn write_settings(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("nomikai-{}-{name}.toml", std::process::id()));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(Path::new("/nonexistent/nomikai.toml"), env_from(&[]));
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.api_base_url, "http://127.0.0.1:8000");
    assert_eq!(settings.request_timeout(), Duration::from_secs(10));
}

#[test]
fn file_values_override_defaults() {
    let path = write_settings(
        "file",
        r#"
api_base_url = "https://api.nomikai.example"
public_origin = "https://nomikai.example"
hash_routing = true
request_timeout_secs = 3
"#,
    );

    let settings = load_settings_from(&path, env_from(&[]));
    let _ = fs::remove_file(&path);

    assert_eq!(settings.api_base_url, "https://api.nomikai.example");
    assert_eq!(settings.public_origin, "https://nomikai.example");
    assert!(settings.hash_routing);
    assert_eq!(settings.request_timeout_secs, 3);
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let path = write_settings("env", "api_base_url = \"https://from-file.example\"\n");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("VITE_API_URL", "https://vite.example"),
            ("APP__API_BASE_URL", "https://app.example"),
            ("NOMIKAI_PUBLIC_ORIGIN", "https://share.example"),
            ("APP__HASH_ROUTING", "yes"),
            ("APP__REQUEST_TIMEOUT_SECS", "30"),
        ]),
    );
    let _ = fs::remove_file(&path);

    assert_eq!(settings.api_base_url, "https://app.example");
    assert_eq!(settings.public_origin, "https://share.example");
    assert!(settings.hash_routing);
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn short_env_names_apply_alone() {
    let settings = load_settings_from(
        Path::new("/nonexistent/nomikai.toml"),
        env_from(&[("VITE_API_URL", "http://localhost:9000/")]),
    );
    assert_eq!(settings.api_base_url, "http://localhost:9000/");
}

#[test]
fn invalid_values_are_ignored() {
    let path = write_settings("broken", "api_base_url = [1, 2");
    let settings = load_settings_from(
        &path,
        env_from(&[
            ("APP__HASH_ROUTING", "sometimes"),
            ("APP__REQUEST_TIMEOUT_SECS", "soon"),
        ]),
    );
    let _ = fs::remove_file(&path);

    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn zero_timeout_is_clamped() {
    let settings = ClientSettings {
        request_timeout_secs: 0,
        ..ClientSettings::default()
    };
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));
}

#[test]
fn normalize_base_url_strips_trailing_slashes() {
    assert_eq!(
        normalize_base_url(" https://api.example/v1// ").expect("valid"),
        "https://api.example/v1"
    );
    assert_eq!(
        normalize_base_url("http://127.0.0.1:8000").expect("valid"),
        "http://127.0.0.1:8000"
    );
}

#[test]
fn normalize_base_url_rejects_unusable_urls() {
    for raw in [
        "",
        "   ",
        "not a url",
        "ftp://api.example",
        "https://api.example?x=1",
        "https://api.example#top",
    ] {
        let err = normalize_base_url(raw).expect_err(raw);
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }), "{raw}");
    }
}

#[test]
fn public_origin_parses_into_url() {
    let settings = ClientSettings {
        public_origin: "https://nomikai.example/".into(),
        ..ClientSettings::default()
    };
    assert_eq!(
        settings.public_origin_url().expect("origin").as_str(),
        "https://nomikai.example/"
    );
}
