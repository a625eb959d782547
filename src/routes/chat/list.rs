use crate::configuration::Settings;
use crate::db::ConversationStore;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;

/// GET /chat
/// Conversations of the signed-in user, newest first.
#[tracing::instrument(name = "List conversations.", skip(store, settings))]
#[get("")]
pub async fn list_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    store: web::Data<Arc<dyn ConversationStore>>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let user = match user {
        Some(user) => user.into_inner(),
        None => return Ok(super::login_redirect(&settings)),
    };

    store
        .list_by_user(&user.id)
        .await
        .map(|list| JsonResponse::build().set_data(list).ok())
        .map_err(|err| {
            tracing::error!("Failed to list conversations: {:?}", err);
            JsonResponse::<()>::build().internal_server_error("An error occurred")
        })
}
