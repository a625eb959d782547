use crate::connectors::{ChatMessage, ClientCache, LlmError};
use std::sync::Arc;

const BASE_PROMPT: &str = "You are a helpful AI assistant.";

/// System prompt for one completion. A non-empty context restricts answers
/// to that text.
pub fn system_prompt(context: Option<&str>) -> String {
    match context.filter(|text| !text.is_empty()) {
        Some(text) => format!(
            "{} Use the following PDF content as context to answer questions. \
             Only answer based on this context. If the question cannot be answered \
             from this context, say so clearly.\n\nContext:\n{}",
            BASE_PROMPT, text
        ),
        None => BASE_PROMPT.to_string(),
    }
}

/// One question, one answer: system prompt + user message, first choice back.
pub struct CompletionService {
    clients: Arc<ClientCache>,
}

impl CompletionService {
    pub fn new(clients: Arc<ClientCache>) -> Self {
        Self { clients }
    }

    #[tracing::instrument(
        name = "Request completion.",
        skip(self, api_key, message, context),
        fields(with_context = context.map_or(false, |c| !c.is_empty()))
    )]
    pub async fn complete(
        &self,
        api_key: &str,
        message: &str,
        context: Option<&str>,
    ) -> Result<String, LlmError> {
        let client = self.clients.get_or_create(api_key).await?;
        let messages = [
            ChatMessage::system(system_prompt(context)),
            ChatMessage::user(message),
        ];

        let answer = client.chat(&messages).await?;
        tracing::info!(model = client.model(), answer_len = answer.len(), "Completion received");

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::LlmServiceConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn generic_prompt_without_context() {
        assert_eq!(system_prompt(None), "You are a helpful AI assistant.");
        assert_eq!(system_prompt(Some("")), "You are a helpful AI assistant.");
    }

    #[test]
    fn context_prompt_restricts_answers() {
        let prompt = system_prompt(Some("Alpha Beta"));

        assert!(prompt.starts_with("You are a helpful AI assistant."));
        assert!(prompt.contains("Only answer based on this context."));
        assert!(prompt.contains("say so clearly"));
        assert!(prompt.ends_with("Context:\nAlpha Beta"));
    }

    #[tokio::test]
    async fn sends_system_then_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [
                    { "role": "system", "content": system_prompt(Some("Alpha Beta")) },
                    { "role": "user", "content": "What is Alpha?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "A letter." } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let clients = Arc::new(ClientCache::new(LlmServiceConfig {
            base_url: server.uri(),
            ..LlmServiceConfig::default()
        }));
        let service = CompletionService::new(clients.clone());

        let answer = service
            .complete("gsk_test", "What is Alpha?", Some("Alpha Beta"))
            .await
            .unwrap();

        assert_eq!(answer, "A letter.");
        assert_eq!(clients.len().await, 1);
    }
}
