use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use serde_derive::Serialize;

/// Body of every JSON answer: `{"status": "Ok", "data": ...}` on success,
/// `{"message": "..."}` on error.
#[derive(Serialize)]
pub(crate) struct JsonResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<T>,
}

pub(crate) struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    status: Option<String>,
    message: Option<String>,
    data: Option<T>,
}

impl<T> Default for JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    fn default() -> Self {
        Self {
            status: None,
            message: None,
            data: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub(crate) fn set_msg<S: Into<String>>(mut self, msg: S) -> Self {
        self.message = Some(msg.into());
        self
    }

    pub(crate) fn set_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    fn to_json_response(self) -> JsonResponse<T> {
        JsonResponse {
            status: self.status,
            message: self.message,
            data: self.data,
        }
    }

    fn success(mut self, code: StatusCode) -> HttpResponse {
        self.status = Some("Ok".to_string());
        HttpResponse::build(code).json(self.to_json_response())
    }

    fn error<S: Into<String>>(self, code: StatusCode, msg: S) -> Error {
        let msg = msg.into();
        tracing::debug!(code = code.as_u16(), "{}", msg);
        let body = self.set_msg(msg.clone()).to_json_response();
        InternalError::from_response(msg, HttpResponse::build(code).json(body)).into()
    }

    pub(crate) fn ok(self) -> HttpResponse {
        self.success(StatusCode::OK)
    }

    pub(crate) fn created(self) -> HttpResponse {
        self.success(StatusCode::CREATED)
    }

    pub(crate) fn bad_request<S: Into<String>>(self, msg: S) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    pub(crate) fn not_found<S: Into<String>>(self, msg: S) -> Error {
        self.error(StatusCode::NOT_FOUND, msg)
    }

    pub(crate) fn bad_gateway<S: Into<String>>(self, msg: S) -> Error {
        self.error(StatusCode::BAD_GATEWAY, msg)
    }

    pub(crate) fn internal_server_error<S: Into<String>>(self, msg: S) -> Error {
        self.error(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub(crate) fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}
