//! Provider Constants
//!
//! Constants specific to provider implementations. Routing constants live in
//! `relay_domain::constants`.

// ============================================================================
// HTTP CLIENT
// ============================================================================

/// JSON content type header value
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Per-request HTTP timeout, in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Attempts per provider call, including the first
pub const DEFAULT_HTTP_MAX_ATTEMPTS: u32 = 2;

/// `extra` key overriding the HTTP timeout (seconds)
pub const EXTRA_TIMEOUT_SECS: &str = "timeout_secs";

/// `extra` key overriding the attempts per call
pub const EXTRA_MAX_ATTEMPTS: &str = "max_attempts";

// ============================================================================
// OLLAMA
// ============================================================================

/// Ollama server default URL
pub const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";

/// Default Ollama chat model
pub const OLLAMA_DEFAULT_CHAT_MODEL: &str = "llama3.2";

/// Default Ollama embedding model
pub const OLLAMA_DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Ollama nomic-embed-text dimension
pub const EMBEDDING_DIMENSION_OLLAMA_NOMIC: usize = 768;

/// Ollama all-minilm dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MINILM: usize = 384;

/// Ollama mxbai-embed-large dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MXBAI: usize = 1024;

/// Ollama default dimension
pub const EMBEDDING_DIMENSION_OLLAMA_DEFAULT: usize = 768;

// ============================================================================
// OPENAI-COMPATIBLE
// ============================================================================

/// OpenAI API base URL
pub const OPENAI_DEFAULT_URL: &str = "https://api.openai.com/v1";

/// Default chat model for OpenAI-compatible endpoints
pub const OPENAI_DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default OpenAI embedding model
pub const OPENAI_DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// OpenAI text-embedding-3-small dimension
pub const EMBEDDING_DIMENSION_OPENAI_SMALL: usize = 1536;

/// OpenAI text-embedding-3-large dimension
pub const EMBEDDING_DIMENSION_OPENAI_LARGE: usize = 3072;

/// OpenAI text-embedding-ada-002 dimension
pub const EMBEDDING_DIMENSION_OPENAI_ADA: usize = 1536;

// ============================================================================
// NULL
// ============================================================================

/// Null embedding provider dimension (for testing)
pub const EMBEDDING_DIMENSION_NULL: usize = 384;
