//! Configuration loader tests

use std::io::Write;

use relay_domain::value_objects::ProviderTier;
use relay_infrastructure::config::{
    AppConfig, AuditSinkKind, ConfigBuilder, ConfigLoader, GenerationProviderSettings,
};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

fn loader_for(file: &NamedTempFile) -> ConfigLoader {
    ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("RELAY_CONFIG_TEST_UNSET")
}

#[test]
fn test_defaults_are_valid() {
    let config = ConfigLoader::new()
        .with_config_path("/nonexistent/relay.toml")
        .with_env_prefix("RELAY_CONFIG_TEST_DEFAULTS")
        .load()
        .expect("defaults load");

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.resilience.failure_threshold, 5);
    assert_eq!(config.resilience.success_threshold, 2);
    assert_eq!(config.providers.embedding.order, "openai,ollama,null");
    assert_eq!(config.providers.embedding.failure_threshold, 3);
    assert_eq!(config.usage.daily_request_limit, 1500);
    assert_eq!(config.providers.generation.len(), 1);
}

#[test]
fn test_file_overrides_defaults() {
    let file = write_config(
        r#"
[logging]
level = "debug"

[[providers.generation]]
name = "cloud"
provider = "openai"
tier = "primary"
api_key = "sk-test"

[[providers.generation]]
name = "local"
provider = "ollama"
tier = "local"

[providers.generation.extra]
timeout_secs = "5"

[providers.embedding]
order = "ollama, null"

[providers.embedding.providers.ollama]
model = "all-minilm"

[resilience]
call_timeout_secs = 10

[usage]
tracked_provider = "cloud"
daily_request_limit = 100

[audit]
sink = "jsonl"
path = "/tmp/relay-audit.jsonl"
"#,
    );

    let config = loader_for(&file).load().expect("load");

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.providers.generation.len(), 2);
    assert_eq!(config.providers.generation[0].tier, ProviderTier::Primary);
    assert_eq!(
        config.providers.generation[1].extra.get("timeout_secs"),
        Some(&"5".to_string())
    );
    assert_eq!(config.providers.embedding.order, "ollama, null");
    assert_eq!(
        config.providers.embedding.providers["ollama"].model.as_deref(),
        Some("all-minilm")
    );
    assert_eq!(config.resilience.call_timeout_secs, 10);
    assert_eq!(config.resilience.reset_timeout_secs, 60);
    assert_eq!(config.usage.daily_request_limit, 100);
    assert_eq!(config.usage.requests_per_minute, 15);
    assert_eq!(config.audit.sink, AuditSinkKind::Jsonl);
}

#[test]
fn test_environment_overrides_file() {
    let file = write_config("[usage]\ndaily_request_limit = 100\n");
    // SAFETY: the variable name is unique to this test
    unsafe {
        std::env::set_var("RELAY_ENV_TEST__USAGE__DAILY_REQUEST_LIMIT", "7");
    }

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("RELAY_ENV_TEST")
        .load()
        .expect("load");

    assert_eq!(config.usage.daily_request_limit, 7);
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        "[resilience]\nfailure_threshold = 0\n",
        "[resilience]\ncall_timeout_secs = 0\n",
        "[usage]\nrequests_per_minute = 0\n",
        "[usage]\ntracked_provider = \"missing\"\n",
        "[audit]\nsink = \"jsonl\"\n",
        "[logging]\nlevel = \"loud\"\n",
        "[providers.embedding]\nfailure_threshold = 0\n",
        "[[providers.generation]]\nname = \"a\"\nprovider = \"null\"\ntier = \"primary\"\n\n\
         [[providers.generation]]\nname = \"a\"\nprovider = \"null\"\ntier = \"local\"\n",
        "[[providers.generation]]\nname = \"a\"\nprovider = \"null\"\ntier = \"sideways\"\n",
    ];

    for contents in cases {
        let file = write_config(contents);
        assert!(
            loader_for(&file).load().is_err(),
            "expected rejection for:\n{contents}"
        );
    }
}

#[test]
fn test_disabled_usage_skips_limit_validation() {
    let file = write_config("[usage]\nenabled = false\ndaily_request_limit = 0\n");
    assert!(loader_for(&file).load().is_ok());
}

#[test]
fn test_saved_config_loads_back() {
    let config = ConfigBuilder::new()
        .with_generation_providers(vec![
            GenerationProviderSettings::new("primary", "null", ProviderTier::Primary),
            GenerationProviderSettings::new("backup", "null", ProviderTier::Fallback),
        ])
        .with_embedding_order("null")
        .build();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("relay.toml");

    let loader = ConfigLoader::new().with_env_prefix("RELAY_CONFIG_TEST_SAVE");
    loader.save_to_file(&config, &path).expect("save");
    let loaded = loader.with_config_path(&path).load().expect("load");

    assert_eq!(loaded, config);
}
