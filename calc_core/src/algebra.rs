//! # Algebra Solver
//!
//! "Solve an algebra problem" hands the problem text to an external language
//! model through a fixed prompt and returns whatever text comes back. There
//! is no parsing, checking or retry of the answer. If the provider call
//! fails, the failure is returned to the caller as
//! [`CalcError::UpstreamFailure`].
//!
//! The provider sits behind [`ModelBackend`] so front ends can swap in any
//! OpenAI-compatible endpoint (or a stub in tests).
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use calc_core::algebra::{AlgebraInput, AlgebraSolver, OpenAiCompatBackend};
//! use calc_core::config::ModelConfig;
//!
//! # async fn demo() -> calc_core::CalcResult<()> {
//! let backend = OpenAiCompatBackend::from_config(&ModelConfig::default())?;
//! let solver = AlgebraSolver::new(Arc::new(backend));
//! let out = solver.solve(&AlgebraInput { problem: "2x + 3 = 11".into() }).await?;
//! println!("{}", out.solution);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ModelConfig;
use crate::errors::{CalcError, CalcResult};
use crate::forms;

/// Longest problem text forwarded to the model
pub const MAX_PROBLEM_CHARS: usize = 2_000;

/// Prompt sent to the model; `{problem}` is replaced with the user's text.
pub const PROMPT_TEMPLATE: &str = "You are an expert math tutor. Solve the following algebra problem. \
Show each step of your working on its own line, explain briefly what is done at each step, \
and finish with a line of the form \"Answer: ...\".\n\nProblem: {problem}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgebraInput {
    pub problem: String,
}

impl AlgebraInput {
    pub fn validate(&self) -> CalcResult<()> {
        let problem = forms::require_text("problem", &self.problem)?;
        if problem.chars().count() > MAX_PROBLEM_CHARS {
            return Err(CalcError::invalid_input(
                "problem",
                format!("{} characters", problem.chars().count()),
                format!("Problem must be at most {} characters", MAX_PROBLEM_CHARS),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgebraOutput {
    pub solution: String,
}

/// Fill the prompt template.
pub fn render_prompt(problem: &str) -> String {
    PROMPT_TEMPLATE.replace("{problem}", problem.trim())
}

/// A text-completion provider.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Short provider name for logs and error messages
    fn name(&self) -> &str;

    /// Send one prompt and return the model's text.
    async fn complete(&self, prompt: &str) -> CalcResult<String>;
}

/// Runs the algebra flow against a backend.
#[derive(Clone)]
pub struct AlgebraSolver {
    backend: Arc<dyn ModelBackend>,
}

impl AlgebraSolver {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        AlgebraSolver { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Validate, prompt, pass the answer through.
    pub async fn solve(&self, input: &AlgebraInput) -> CalcResult<AlgebraOutput> {
        input.validate()?;
        let prompt = render_prompt(&input.problem);
        info!(backend = self.backend_name(), chars = input.problem.len(), "solving algebra problem");

        let solution = self.backend.complete(&prompt).await.inspect_err(|e| {
            warn!(backend = self.backend_name(), error = %e, "model call failed");
        })?;
        Ok(AlgebraOutput { solution })
    }
}

// ============================================================================
// OpenAI-compatible backend
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Backend for any server exposing `/v1/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiCompatBackend {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatBackend {
    /// Build from configuration. The API key is read from the environment
    /// variable the config names; a missing key is allowed for local servers.
    pub fn from_config(config: &ModelConfig) -> CalcResult<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(format!("Quickcalc/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CalcError::config(format!("Failed to create HTTP client: {}", e)))?;

        let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!(env = %config.api_key_env, "no model API key set, sending unauthenticated requests");
        }

        Ok(OpenAiCompatBackend {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn first_choice(response: ChatResponse) -> CalcResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| CalcError::upstream("model", "response contained no choices"))
}

#[async_trait]
impl ModelBackend for OpenAiCompatBackend {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> CalcResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        let mut req = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| CalcError::upstream(&self.model, format!("Network error: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CalcError::upstream(
                &self.model,
                format!("API returned {}: {}", status, body),
            ));
        }

        let response: ChatResponse = resp
            .json()
            .await
            .map_err(|e| CalcError::upstream(&self.model, format!("Failed to parse response: {}", e)))?;
        first_choice(response)
    }
}
