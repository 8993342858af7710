/// HTTP surface for lead intake.
///
/// - `POST /api/lead`: accept a form submission and forward it by email (204 / 500)
/// - `OPTIONS /api/lead`: CORS preflight (204)
/// - `GET /health`: liveness probe
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use hiddenpg_common::email::{Mailer, OutboundEmail};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::cors::apply_cors;
use crate::error::AppError;
use crate::lead::LeadSubmission;
use crate::template;

pub const LEAD_PATH: &str = "/api/lead";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(config: Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config: Arc::new(config),
            mailer,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(LEAD_PATH, post(submit_lead).options(preflight))
        .route("/health", get(health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), apply_cors))
        .with_state(state)
}

/// Panics surface as a 500 JSON error. Sits inside the CORS layer so the response still
/// carries CORS headers.
fn panic_response(payload: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let err = AppError::from_panic(payload);
    error!(error = %err, "handler panicked");
    err.into_response()
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn submit_lead(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, AppError> {
    let body = body.inspect_err(|e| error!(error = %e, "failed to read lead body"))?;
    let lead = LeadSubmission::from_body(&body);

    let unknown = lead.unknown_fields();
    if !unknown.is_empty() {
        debug!(form = %lead.kind, fields = ?unknown, "lead carries fields outside the schema");
    }

    // Fake success so automated submitters get no signal.
    if state.config.honeypot.is_spam(&lead) {
        warn!(form = %lead.kind, source = %lead.source, "honeypot filled, dropping lead");
        return Ok(StatusCode::NO_CONTENT);
    }

    let rendered = template::render(&lead);
    let email = OutboundEmail {
        from: state.config.lead_from.clone(),
        to: vec![state.config.lead_to.clone()],
        subject: rendered.subject,
        html: rendered.html,
        text: rendered.text,
        reply_to: lead.reply_to().map(str::to_string),
    };

    match state.mailer.send(&email).await {
        Ok(receipt) => {
            info!(
                form = %lead.kind,
                source = %lead.source,
                reply_to = email.reply_to.is_some(),
                id = ?receipt.id,
                "lead forwarded"
            );
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            error!(form = %lead.kind, error = %e, "lead delivery failed");
            Err(AppError::Delivery(e))
        }
    }
}
