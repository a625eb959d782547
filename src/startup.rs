use crate::configuration::Settings;
use crate::connectors::ClientCache;
use crate::db::ConversationStore;
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use crate::services::{ChatService, CompletionService};
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn ConversationStore>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let clients = Arc::new(ClientCache::new(settings.connectors.llm_service.clone()));
    let completion = Arc::new(CompletionService::new(clients));
    let chat_service = web::Data::new(ChatService::new(store.clone(), completion));

    let store = web::Data::new(store);
    let settings = web::Data::new(settings);

    let oauth_http_client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let oauth_http_client = web::Data::new(oauth_http_client);

    let oauth_cache = web::Data::new(middleware::authentication::OAuthCache::new(
        Duration::from_secs(60),
    ));

    let json_config = web::JsonConfig::default()
        .limit(settings.max_body_bytes)
        .error_handler(|err, _req| {
            let msg = match err {
                error::JsonPayloadError::Deserialize(err) => format!(
                    "Invalid JSON at line {}, column {}: {}",
                    err.line(),
                    err.column(),
                    err
                ),
                err => err.to_string(),
            };
            JsonResponse::<()>::build().bad_request(msg)
        });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(Cors::permissive())
            .app_data(oauth_http_client.clone())
            .app_data(oauth_cache.clone())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/chat")
                    .service(routes::chat::list_handler)
                    .service(routes::chat::new_handler)
                    .service(routes::chat::item)
                    .service(routes::chat::reply_handler),
            )
            .service(
                web::scope("/api/updateConversation")
                    .service(routes::conversation::update_handler)
                    .service(routes::conversation::pdf_name_handler),
            )
            .app_data(json_config.clone())
            .app_data(store.clone())
            .app_data(chat_service.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
