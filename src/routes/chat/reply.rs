use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::ChatService;
use actix_web::{post, web, HttpResponse, Responder, Result};
use serde_valid::Validate;

/// POST /chat/{conversation_id}
/// Adds one question/answer pair to an existing conversation.
#[tracing::instrument(name = "Continue chat.", skip(chat))]
#[post("/{conversation_id}")]
pub async fn reply_handler(
    path: web::Path<(String,)>,
    form: web::Json<forms::NewMessage>,
    chat: web::Data<ChatService>,
) -> Result<impl Responder> {
    let (conversation_id,) = path.into_inner();

    if let Err(errors) = form.validate() {
        tracing::debug!("Invalid data received {}", errors);
        return Err(JsonResponse::<()>::build().bad_request(forms::MISSING_FIELDS));
    }

    chat.chat(form.into_inner().into_message(conversation_id))
        .await
        .map(|_| HttpResponse::NoContent().finish())
        .map_err(super::chat_error)
}
