use crate::db::ConversationStore;
use crate::helpers::JsonResponse;
use crate::views;
use actix_web::{get, http::header, web, Responder, Result};
use std::sync::Arc;

/// GET /chat/{id}
/// Always read fresh: the page must show appends made by other requests.
#[tracing::instrument(name = "Get conversation.", skip(store))]
#[get("/{id}")]
pub async fn item(
    path: web::Path<(String,)>,
    store: web::Data<Arc<dyn ConversationStore>>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    store
        .fetch(&id)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch conversation: {:?}", err);
            JsonResponse::<()>::build().internal_server_error("An error occurred")
        })?
        .ok_or_else(|| JsonResponse::<()>::build().not_found("Conversation not found"))
        .map(|conversation| {
            let mut response = JsonResponse::build()
                .set_data(views::conversation::Page::from(conversation))
                .ok();
            response.headers_mut().insert(
                header::CACHE_CONTROL,
                header::HeaderValue::from_static("no-store"),
            );
            response
        })
}
