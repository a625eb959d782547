#![allow(dead_code)]

use actix_web::{get, web, App, HttpRequest, HttpResponse, HttpServer};
use pdfchat::configuration::{get_configuration, DatabaseSettings, Settings};
use pdfchat::db::{ConversationStore, InMemoryConversationStore};
use pdfchat::forms;
use serde_json::json;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_USER_ID: &str = "test_user_id";
pub const TEST_API_KEY: &str = "gsk_test_key";

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryConversationStore>,
    pub llm: MockServer,
    pub settings: Settings,
}

impl TestApp {
    /// Client that keeps redirects visible, like a browser form post would.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Every completion request answers `answer`.
    pub async fn llm_answers(&self, answer: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": answer } }]
            })))
            .mount(&self.llm)
            .await;
    }

    pub async fn post_new_chat(&self, body: serde_json::Value) -> reqwest::Response {
        self.client()
            .post(self.url("/chat"))
            .bearer_auth(TEST_TOKEN)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Starts a conversation through the API and returns its id.
    pub async fn start_conversation(&self, message: &str) -> String {
        let response = self
            .post_new_chat(json!({ "message": message, "apiKey": TEST_API_KEY }))
            .await;
        assert_eq!(response.status().as_u16(), 303);

        let location = response.headers()["location"].to_str().unwrap();
        location
            .strip_prefix("/chat/")
            .expect("redirect to the conversation")
            .to_string()
    }
}

pub async fn spawn_app() -> TestApp {
    let mut configuration = get_configuration().expect("Failed to get configuration");

    let auth_listener =
        TcpListener::bind("127.0.0.1:0").expect("Failed to bind port for testing auth server");
    configuration.auth_url = format!(
        "http://127.0.0.1:{}/me",
        auth_listener.local_addr().unwrap().port()
    );
    let _ = tokio::spawn(mock_auth_server(auth_listener));

    let llm = MockServer::start().await;
    configuration.connectors.llm_service.base_url = llm.uri();

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(InMemoryConversationStore::new());
    let server = pdfchat::startup::run(
        listener,
        store.clone() as Arc<dyn ConversationStore>,
        configuration.clone(),
    )
    .await
    .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        llm,
        settings: configuration,
    }
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

/// A fresh, migrated database, or `None` when PostgreSQL is unreachable.
pub async fn test_database() -> Option<PgPool> {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    match configure_database(&configuration.database).await {
        Ok(pool) => Some(pool),
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            None
        }
    }
}

#[get("")]
async fn mock_auth(req: HttpRequest) -> HttpResponse {
    let authorized = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {}", TEST_TOKEN).as_str());
    if !authorized {
        return HttpResponse::Unauthorized().finish();
    }

    let user = forms::user::User {
        id: TEST_USER_ID.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: "test@example.com".to_string(),
        email_confirmed: true,
    };

    HttpResponse::Ok().json(forms::UserForm { user })
}

fn mock_auth_server(listener: TcpListener) -> actix_web::dev::Server {
    HttpServer::new(|| App::new().service(web::scope("/me").service(mock_auth)))
        .listen(listener)
        .unwrap()
        .run()
}
