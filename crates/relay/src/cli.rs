//! Command line interface
//!
//! Every command prints a single JSON document on stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use relay_application::ports::registry::{list_embedding_providers, list_generation_providers};
use relay_domain::value_objects::{ChatMessage, GenerateRequest};
use relay_infrastructure::{AppConfig, AppContext, init_app};
use serde_json::{Value, json};

/// Command line interface for Relay
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Relay - Multi-provider generation and embedding router")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Relay commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Probe every provider and report breaker and quota state
    Health,

    /// Generate text through the failover chain
    Generate {
        /// User prompt
        #[arg(short, long)]
        prompt: String,

        /// System instruction
        #[arg(short, long, default_value = "")]
        system: String,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,

        /// Maximum tokens to generate
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// Embed one or more texts through the embedding fallback order
    Embed {
        /// Texts to embed
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// List provider types available to the configuration
    Providers,
}

/// Run `command` against a freshly built context
pub async fn execute(command: &Command, config: AppConfig) -> anyhow::Result<Value> {
    if *command == Command::Providers {
        return Ok(providers());
    }

    let context = init_app(config)
        .await
        .context("Failed to initialize Relay")?;
    let result = match command {
        Command::Health => Ok(health(&context).await),
        Command::Generate {
            prompt,
            system,
            temperature,
            max_tokens,
        } => generate(&context, prompt, system, *temperature, *max_tokens).await,
        Command::Embed { texts } => embed(&context, texts).await,
        Command::Providers => Ok(providers()),
    };
    context.shutdown().await;
    result
}

fn providers() -> Value {
    let entries = |list: Vec<(&'static str, &'static str)>| -> Vec<Value> {
        list.into_iter()
            .map(|(name, description)| json!({ "name": name, "description": description }))
            .collect()
    };
    json!({
        "generation": entries(list_generation_providers()),
        "embedding": entries(list_embedding_providers()),
    })
}

async fn health(context: &AppContext) -> Value {
    let generation = context.generation();
    let embedding = context.embedding();

    let breakers: serde_json::Map<String, Value> = generation
        .breaker_states()
        .await
        .into_iter()
        .map(|(name, state)| (name, Value::String(state.to_string())))
        .collect();
    let usage = generation
        .tracked_provider()
        .and_then(|name| context.usage().usage_stats(name));

    json!({
        "generation": generation.provider_health().await,
        "embedding": embedding.provider_health().await,
        "breakers": breakers,
        "tracked_provider": generation.tracked_provider(),
        "usage": usage,
        "requests_this_minute": context.usage().rpm_count(),
    })
}

async fn generate(
    context: &AppContext,
    prompt: &str,
    system: &str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> anyhow::Result<Value> {
    let mut request = GenerateRequest::new(system).with_message(ChatMessage::user(prompt));
    if let Some(temperature) = temperature {
        request = request.with_temperature(temperature);
    }
    if let Some(max_tokens) = max_tokens {
        request = request.with_max_output_tokens(max_tokens);
    }

    let response = context
        .generation()
        .generate(&request)
        .await
        .context("Generation failed")?;
    Ok(serde_json::to_value(response)?)
}

async fn embed(context: &AppContext, texts: &[String]) -> anyhow::Result<Value> {
    let router = context.embedding();
    let embeddings = router
        .generate_batch_embeddings(texts)
        .await
        .context("Embedding failed")?;

    Ok(json!({
        "provider": router.get_active_provider(),
        "dimensions": embeddings.first().map(|e| e.dimensions),
        "embeddings": embeddings,
    }))
}
