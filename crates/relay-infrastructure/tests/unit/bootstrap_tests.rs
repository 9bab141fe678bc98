//! Composition root tests using the offline null providers

use relay_application::usage::UsageConfig;
use relay_domain::value_objects::{ChatMessage, GenerateRequest, ProviderTier};
use relay_infrastructure::config::{
    AuditConfig, AuditSinkKind, ConfigBuilder, GenerationProviderSettings,
};
use relay_infrastructure::init_app;

fn offline_config() -> relay_infrastructure::AppConfig {
    ConfigBuilder::new()
        .with_generation_providers(vec![
            GenerationProviderSettings::new("backup", "null", ProviderTier::Fallback),
            GenerationProviderSettings::new("primary", "null", ProviderTier::Primary),
        ])
        .with_embedding_order("null")
        .with_audit(AuditConfig {
            sink: AuditSinkKind::Memory,
            ..AuditConfig::default()
        })
        .build()
}

#[tokio::test]
async fn test_init_app_orders_providers_by_tier() {
    let context = init_app(offline_config()).await.expect("init");

    let generation = context.generation();
    assert_eq!(generation.registry().names(), ["primary", "backup"]);
    assert_eq!(generation.tracked_provider(), Some("primary"));
    assert_eq!(context.breakers().len(), 2);
    assert_eq!(context.embedding().providers().names(), ["null"]);

    context.shutdown().await;
}

#[tokio::test]
async fn test_routes_through_null_providers() {
    let context = init_app(offline_config()).await.expect("init");

    let request = GenerateRequest::new("").with_message(ChatMessage::user("ping"));
    let response = context.generation().generate(&request).await.expect("generate");
    assert_eq!(response.model_used, "primary");
    assert_eq!(response.text, "[primary] ping");

    let usage = context.usage().usage_stats("primary").expect("tracked usage");
    assert_eq!(usage.request_count, 1);

    let embedding = context
        .embedding()
        .generate_embedding("hello")
        .await
        .expect("embed");
    assert_eq!(embedding.dimensions, 384);
    assert_eq!(context.embedding().get_active_provider().as_deref(), Some("null"));

    context.shutdown().await;
}

#[tokio::test]
async fn test_unknown_provider_fails_startup() {
    let config = ConfigBuilder::new()
        .with_generation_providers(vec![GenerationProviderSettings::new(
            "mystery",
            "does-not-exist",
            ProviderTier::Primary,
        )])
        .with_usage(UsageConfig::disabled())
        .build();

    let err = init_app(config).await.expect_err("must fail");
    assert!(err.to_string().contains("mystery"));
}

#[tokio::test]
async fn test_configured_embedding_provider_must_resolve() {
    let mut config = offline_config();
    config.providers.embedding.order = "openai,null".to_string();
    config
        .providers
        .embedding
        .providers
        .insert("openai".to_string(), Default::default());

    let err = init_app(config).await.expect_err("openai without api_key");
    assert!(err.to_string().contains("openai"));
}
