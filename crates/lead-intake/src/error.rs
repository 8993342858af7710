use std::any::Any;

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hiddenpg_common::email::MailerError;
use hiddenpg_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    /// Delivery failed; the message is the provider's (or transport's) own wording.
    #[error(transparent)]
    Delivery(#[from] MailerError),

    /// The request body could not be read (e.g. it exceeds the body size limit).
    #[error(transparent)]
    Body(#[from] BytesRejection),

    /// A handler panicked; carries the panic message when it had one.
    #[error("{0}")]
    Panic(String),

    #[error(transparent)]
    Common(#[from] CommonError),
}

impl AppError {
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            String::new()
        };
        Self::Panic(message)
    }
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut message = self.to_string();
        if message.trim().is_empty() {
            message = "Email send failed".to_string();
        }
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error: message })).into_response()
    }
}
