//! Typed HTTP client for the chat backend.
//!
//! Redirects are never followed: `POST /chat` answers with a redirect whose
//! target carries either the new conversation id or the login path.

use crate::client::error::ClientError;
use crate::forms;
use crate::models;
use reqwest::header::LOCATION;
use reqwest::{redirect, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PdfNameBody {
    pdf_name: Option<String>,
}

/// Conversation as shown on its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationPage {
    pub id: String,
    pub name: String,
    pub messages: Vec<models::MessageEntry>,
    pub pdf_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateConversationBody<'a> {
    id: &'a str,
    file_name: &'a str,
    pdf_text: &'a str,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ApiClient
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|err| ClientError::ClientBuild(err.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
            http,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ── Chat ─────────────────────────────────────────

    /// Starts a conversation and returns its id.
    pub async fn new_chat(&self, form: &forms::NewMessage) -> Result<String, ClientError> {
        let url = format!("{}/chat", self.base_url);
        let resp = self.authorized(self.http.post(&url)).json(form).send().await?;

        if resp.status() != StatusCode::SEE_OTHER {
            return Err(error_from(resp).await);
        }

        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        conversation_id_from(location).ok_or(ClientError::LoginRequired)
    }

    /// Adds a question to an existing conversation.
    pub async fn chat(
        &self,
        conversation_id: &str,
        form: &forms::NewMessage,
    ) -> Result<(), ClientError> {
        let url = format!("{}/chat/{}", self.base_url, conversation_id);
        let resp = self.authorized(self.http.post(&url)).json(form).send().await?;

        match resp.status() {
            status if status.is_success() => Ok(()),
            StatusCode::SEE_OTHER => Err(ClientError::LoginRequired),
            _ => Err(error_from(resp).await),
        }
    }

    pub async fn conversation(&self, id: &str) -> Result<ConversationPage, ClientError> {
        let url = format!("{}/chat/{}", self.base_url, id);
        let resp = self.authorized(self.http.get(&url)).send().await?;

        data_from(resp).await
    }

    pub async fn list(&self) -> Result<Vec<models::ConversationSummary>, ClientError> {
        let url = format!("{}/chat", self.base_url);
        let resp = self.authorized(self.http.get(&url)).send().await?;

        if resp.status() == StatusCode::SEE_OTHER {
            return Err(ClientError::LoginRequired);
        }

        data_from(resp).await
    }

    // ── PDF ──────────────────────────────────────────

    pub async fn upload_pdf(
        &self,
        conversation_id: &str,
        file_name: &str,
        pdf_text: &str,
    ) -> Result<models::Conversation, ClientError> {
        let url = format!("{}/api/updateConversation", self.base_url);
        let body = UpdateConversationBody {
            id: conversation_id,
            file_name,
            pdf_text,
        };
        let resp = self.authorized(self.http.post(&url)).json(&body).send().await?;

        data_from(resp).await
    }

    /// Name of the attached PDF. Any failure reads as "no PDF".
    pub async fn pdf_name(&self, conversation_id: &str) -> Option<String> {
        match self.try_pdf_name(conversation_id).await {
            Ok(name) => name,
            Err(err) => {
                tracing::debug!("Failed to fetch pdf name: {}", err);
                None
            }
        }
    }

    async fn try_pdf_name(&self, conversation_id: &str) -> Result<Option<String>, ClientError> {
        let url = format!("{}/api/updateConversation", self.base_url);
        let resp = self
            .authorized(self.http.get(&url))
            .query(&[("id", conversation_id)])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from(resp).await);
        }

        Ok(resp.json::<PdfNameBody>().await?.pdf_name)
    }
}

fn conversation_id_from(location: &str) -> Option<String> {
    location
        .strip_prefix("/chat/")
        .filter(|id| !id.is_empty() && !id.contains('/'))
        .map(str::to_string)
}

async fn data_from<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    if !resp.status().is_success() {
        return Err(error_from(resp).await);
    }

    let envelope: Envelope<T> = resp
        .json()
        .await
        .map_err(|err| ClientError::UnexpectedResponse(err.to_string()))?;

    Ok(envelope.data)
}

async fn error_from(resp: Response) -> ClientError {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or(text);

    ClientError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn form() -> forms::NewMessage {
        forms::NewMessage {
            message: "Summarize this".to_string(),
            api_key: "gsk_test".to_string(),
        }
    }

    #[test]
    fn conversation_id_is_read_from_location() {
        assert_eq!(conversation_id_from("/chat/abc-1").as_deref(), Some("abc-1"));
        assert!(conversation_id_from("/login").is_none());
        assert!(conversation_id_from("/chat/").is_none());
    }

    #[tokio::test]
    async fn new_chat_returns_id_without_following_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("authorization", "Bearer t0ken"))
            .respond_with(ResponseTemplate::new(303).insert_header("Location", "/chat/c-42"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), Some("t0ken")).unwrap();
        let id = client.new_chat(&form()).await.unwrap();

        assert_eq!(id, "c-42");
    }

    #[tokio::test]
    async fn login_redirect_means_login_required() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(303).insert_header("Location", "/login"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let err = client.new_chat(&form()).await.unwrap_err();

        assert!(matches!(err, ClientError::LoginRequired));
    }

    #[tokio::test]
    async fn server_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_json(json!({ "message": "401 Invalid API Key" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let err = client.new_chat(&form()).await.unwrap_err();

        assert_eq!(err.to_string(), "401 Invalid API Key");
        assert!(matches!(err, ClientError::Api { status: 502, .. }));
    }

    #[tokio::test]
    async fn pdf_name_falls_back_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/updateConversation"))
            .and(query_param("id", "known"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "Ok", "pdfName": "doc.pdf" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/updateConversation"))
            .and(query_param("id", "missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "message": "Conversation not found" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();

        assert_eq!(client.pdf_name("known").await.as_deref(), Some("doc.pdf"));
        assert_eq!(client.pdf_name("missing").await, None);
    }

    #[tokio::test]
    async fn unreachable_server_also_reads_as_no_pdf() {
        let client = ApiClient::new("http://127.0.0.1:1", None).unwrap();
        assert_eq!(client.pdf_name("c1").await, None);
    }
}
