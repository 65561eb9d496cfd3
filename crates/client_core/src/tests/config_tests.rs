use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_point_at_local_service() {
    let config = ClientConfig::from_sources(None, env_from(&[])).expect("config");
    assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
    assert_eq!(config.recommendation_limit, 10);
    assert_eq!(config.activity_limit, 20);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
}

#[test]
fn file_values_are_overridden_by_environment() {
    let file = r#"
        api_url = "http://file-host:9000"
        request_timeout_secs = 5
    "#;
    let from_file = ClientConfig::from_sources(Some(file), env_from(&[])).expect("config");
    assert_eq!(from_file.base_url.as_str(), "http://file-host:9000/");
    assert_eq!(from_file.request_timeout, Duration::from_secs(5));

    let overridden = ClientConfig::from_sources(
        Some(file),
        env_from(&[
            ("AGENT_API_URL", "http://env-host:8000/"),
            ("APP__REQUEST_TIMEOUT_SECS", "12"),
        ]),
    )
    .expect("config");
    assert_eq!(overridden.base_url.as_str(), "http://env-host:8000/");
    assert_eq!(overridden.request_timeout, Duration::from_secs(12));
}

#[test]
fn app_prefixed_variable_wins_over_plain_one() {
    let config = ClientConfig::from_sources(
        None,
        env_from(&[
            ("AGENT_API_URL", "http://plain:1"),
            ("APP__API_URL", "http://prefixed:2"),
        ]),
    )
    .expect("config");
    assert_eq!(config.base_url.as_str(), "http://prefixed:2/");
}

#[test]
fn blank_environment_values_are_ignored() {
    let config = ClientConfig::from_sources(
        None,
        env_from(&[("AGENT_API_URL", "   "), ("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    )
    .expect("config");
    assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
}

#[test]
fn rejects_non_http_urls() {
    assert!(matches!(
        normalize_base_url("ftp://example.com"),
        Err(ConfigError::UnsupportedScheme(_))
    ));
    assert!(matches!(normalize_base_url("  "), Err(ConfigError::EmptyUrl)));
    assert!(matches!(
        ClientConfig::from_sources(Some("api_url = 3"), env_from(&[])),
        Err(ConfigError::File(_))
    ));
}

#[test]
fn endpoint_keeps_base_path_and_encodes_segments() {
    let config = ClientConfig::with_base_url("http://127.0.0.1:8000/agent/").expect("config");
    assert_eq!(
        config.endpoint(&["api", "recommend"]).as_str(),
        "http://127.0.0.1:8000/agent/api/recommend"
    );
    assert_eq!(
        config.endpoint(&["api", "activity", "team a/b"]).as_str(),
        "http://127.0.0.1:8000/agent/api/activity/team%20a%2Fb"
    );
}
