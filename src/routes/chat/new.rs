use crate::configuration::Settings;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ChatService;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

/// POST /chat
/// Asks the first question and redirects to the new conversation.
#[tracing::instrument(name = "New chat.", skip(chat, settings))]
#[post("")]
pub async fn new_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::NewMessage>,
    chat: web::Data<ChatService>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let user = match user {
        Some(user) => user.into_inner(),
        None => return Ok(super::login_redirect(&settings)),
    };

    if let Err(errors) = form.validate() {
        tracing::debug!("Invalid data received {}", errors);
        return Err(JsonResponse::<()>::build().bad_request(forms::MISSING_FIELDS));
    }

    chat.new_chat(&user.id, form.into_inner())
        .await
        .map(|id| super::conversation_redirect(&id))
        .map_err(super::chat_error)
}
