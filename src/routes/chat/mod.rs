mod get;
mod list;
mod new;
mod reply;

pub use get::*;
pub use list::*;
pub use new::*;
pub use reply::*;

use crate::configuration::Settings;
use crate::connectors::LlmError;
use crate::helpers::JsonResponse;
use crate::services::ChatError;
use actix_web::{http::header, HttpResponse};

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn login_redirect(settings: &Settings) -> HttpResponse {
    see_other(&settings.login_url)
}

pub(crate) fn conversation_redirect(id: &str) -> HttpResponse {
    see_other(&format!("/chat/{id}"))
}

pub(crate) fn chat_error(err: ChatError) -> actix_web::Error {
    match err {
        ChatError::Completion(LlmError::InvalidApiKey) => {
            JsonResponse::<()>::build().bad_request(LlmError::InvalidApiKey.to_string())
        }
        ChatError::Completion(err) => {
            tracing::error!("Completion failed: {}", err);
            JsonResponse::<()>::build().bad_gateway(err.to_string())
        }
        ChatError::ConversationNotFound => {
            JsonResponse::<()>::build().not_found("Conversation not found")
        }
        ChatError::Store(err) => {
            tracing::error!("Failed to save conversation: {:?}", err);
            JsonResponse::<()>::build().internal_server_error("Failed to save conversation")
        }
    }
}
