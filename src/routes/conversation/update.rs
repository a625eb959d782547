use crate::db::ConversationStore;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::views;
use actix_web::{get, post, web, HttpResponse, Responder, Result};
use std::sync::Arc;

/// POST /api/updateConversation
/// Attaches an uploaded PDF to a conversation, creating it when needed.
#[tracing::instrument(name = "Attach pdf to conversation.", skip(store))]
#[post("")]
pub async fn update_handler(
    form: web::Json<forms::UpdateConversationForm>,
    store: web::Data<Arc<dyn ConversationStore>>,
) -> Result<impl Responder> {
    let attachment = forms::PdfAttachment::try_from(form.into_inner())
        .map_err(|msg| JsonResponse::<()>::build().bad_request(msg))?;

    store
        .upsert_pdf(&attachment.id, &attachment.file_name, &attachment.pdf_text)
        .await
        .map(|conversation| {
            tracing::info!(conversation_id = %conversation.id, "Pdf attached");
            JsonResponse::build().set_data(conversation).created()
        })
        .map_err(|err| {
            tracing::error!("Failed to update conversation: {:?}", err);
            JsonResponse::<()>::build().internal_server_error("An error occurred")
        })
}

/// GET /api/updateConversation?id={id}
/// Name of the PDF attached to a conversation, `null` when none is.
#[tracing::instrument(name = "Get conversation pdf name.", skip(store))]
#[get("")]
pub async fn pdf_name_handler(
    query: web::Query<forms::PdfNameQuery>,
    store: web::Data<Arc<dyn ConversationStore>>,
) -> Result<impl Responder> {
    let id = match query.into_inner().id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            return Err(
                JsonResponse::<()>::build().bad_request("Missing required 'id' parameter")
            )
        }
    };

    store
        .fetch(&id)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch conversation: {:?}", err);
            JsonResponse::<()>::build().internal_server_error("An error occurred")
        })?
        .ok_or_else(|| JsonResponse::<()>::build().not_found("Conversation not found"))
        .map(|conversation| {
            HttpResponse::Ok().json(views::conversation::PdfName::new(conversation.pdf_name))
        })
}
