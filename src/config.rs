//! Configuration types for flashcard generation.
//!
//! All generation behaviour is controlled through [`GenerationConfig`], built
//! via its [`GenerationConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across invocations and to diff two runs to
//! understand why their outputs differ.

use crate::error::Pdf2CardsError;
use crate::pipeline::llm::RemoteGenerator;
use crate::progress::ProgressCallback;
use std::fmt;
use std::sync::Arc;

/// Default chat-completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://text.pollinations.ai/openai";

/// Default model identifier sent in the request payload.
pub const DEFAULT_MODEL: &str = "openai";

/// Environment variable consulted for the bearer credential when none is set
/// on the config.
pub const API_KEY_ENV: &str = "PDF2CARDS_API_KEY";

/// Configuration for a flashcard generation run.
///
/// Built via [`GenerationConfig::builder()`] or using
/// [`GenerationConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2cards::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .max_input_chars(5000)
///     .model("openai")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct GenerationConfig {
    /// Chat-completion endpoint URL. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Bearer credential for the `Authorization` header. If `None`, the
    /// [`API_KEY_ENV`] environment variable is consulted at request time.
    pub api_key: Option<String>,

    /// Model identifier placed in the request payload. Default: `"openai"`.
    pub model: String,

    /// Response-length ceiling the endpoint is asked for. Default: 1000.
    ///
    /// 25 short Q/A pairs comfortably fit in 1000 tokens; raising this mostly
    /// buys the model room to ramble outside the requested format.
    pub max_tokens: usize,

    /// Maximum input characters sent to the model. Default: 7000.
    ///
    /// Longer inputs are truncated (with a marker and a user-facing warning)
    /// before prompting. The budget keeps the prompt under the endpoint's
    /// payload ceiling — inputs past it tend to come back as HTTP 500.
    pub max_input_chars: usize,

    /// Maximum number of cards kept from the model response. Default: 25.
    ///
    /// The prompt asks the model for at most 25; this cap also enforces the
    /// bound locally, so a non-compliant response cannot inflate the deck.
    pub max_cards: usize,

    /// Custom system prompt. If `None`, uses
    /// [`crate::prompts::FLASHCARD_SYSTEM_PROMPT`].
    pub system_prompt: Option<String>,

    /// Pre-constructed remote generator. Takes precedence over
    /// `endpoint`/`api_key`. Primarily for tests and embedders that need
    /// custom transport behaviour.
    pub generator: Option<Arc<dyn RemoteGenerator>>,

    /// Optional per-stage progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1000,
            max_input_chars: 7000,
            max_cards: 25,
            system_prompt: None,
            generator: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("max_input_chars", &self.max_input_chars)
            .field("max_cards", &self.max_cards)
            .field("system_prompt", &self.system_prompt)
            .field("generator", &self.generator.as_ref().map(|_| "<dyn RemoteGenerator>"))
            .finish()
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n.max(1);
        self
    }

    pub fn max_input_chars(mut self, n: usize) -> Self {
        self.config.max_input_chars = n;
        self
    }

    pub fn max_cards(mut self, n: usize) -> Self {
        self.config.max_cards = n.clamp(1, 25);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn generator(mut self, generator: Arc<dyn RemoteGenerator>) -> Self {
        self.config.generator = Some(generator);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, Pdf2CardsError> {
        let c = &self.config;
        if c.endpoint.is_empty() {
            return Err(Pdf2CardsError::InvalidConfig(
                "Endpoint URL must not be empty".into(),
            ));
        }
        if c.max_input_chars < 100 {
            return Err(Pdf2CardsError::InvalidConfig(format!(
                "max_input_chars must be ≥ 100, got {}",
                c.max_input_chars
            )));
        }
        if c.model.is_empty() {
            return Err(Pdf2CardsError::InvalidConfig(
                "Model name must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
