use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

/// Proxy to an OpenAI-compatible chat-completions endpoint that explains a
/// learner's translation mistake. Progress state never depends on this call.
#[derive(Debug, Clone)]
pub struct Explainer {
    config: LlmConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    #[error("mistake explanations are disabled")]
    Disabled,
    #[error("llm request timed out")]
    Timeout,
    #[error("llm connection failed: {0}")]
    Connect(String),
    #[error("llm api error: status={status}, message={message}")]
    Api { status: u16, message: String },
    #[error("llm response parse failed: {0}")]
    Parse(String),
}

impl Explainer {
    pub fn new(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            config: config.clone(),
            client,
        }
    }

    pub async fn explain(
        &self,
        prompt: &str,
        correct_answer: &str,
        user_answer: &str,
    ) -> Result<String, ExplainError> {
        if !self.config.enabled {
            return Err(ExplainError::Disabled);
        }
        if self.config.mock {
            return Ok(format!(
                "Compare your answer \"{user_answer}\" with \"{correct_answer}\" \
                 and note where they differ."
            ));
        }

        let instruction = format!(
            "You are a language tutor. In one or two sentences, explain the \
             learner's mistake. Do not greet. \
             Source sentence: \"{prompt}\". \
             Correct translation: \"{correct_answer}\". \
             Learner's translation: \"{user_answer}\"."
        );
        let payload = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: instruction,
            }],
            stream: false,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExplainError::Timeout
                } else {
                    ExplainError::Connect(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExplainError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExplainError::Parse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ExplainError::Parse("response contained no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, mock: bool) -> LlmConfig {
        LlmConfig {
            enabled,
            mock,
            api_url: "http://127.0.0.1:9".to_string(),
            api_key: String::new(),
            model: "test-model".to_string(),
            timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn disabled_mode_returns_error() {
        let explainer = Explainer::new(&config(false, true));
        let result = explainer.explain("p", "c", "u").await;
        assert!(matches!(result, Err(ExplainError::Disabled)));
    }

    #[tokio::test]
    async fn mock_mode_returns_text() {
        let explainer = Explainer::new(&config(true, true));
        let text = explainer.explain("p", "correct", "wrong").await.unwrap();
        assert!(text.contains("wrong"));
        assert!(text.contains("correct"));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_connect_error() {
        // Port 9 (discard) refuses connections; must surface as Connect,
        // not as success or a parse error.
        let explainer = Explainer::new(&config(true, false));
        let result = explainer.explain("p", "c", "u").await;
        assert!(matches!(
            result,
            Err(ExplainError::Connect(_)) | Err(ExplainError::Timeout)
        ));
    }
}
