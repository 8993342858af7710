use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
    VARY,
};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::server::AppState;

/// Origin policy for the lead endpoint.
///
/// Unlike a plain allow-list, a disallowed origin still receives a header: the production
/// site's origin, which the browser will then refuse to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allowed_origins: Vec<String>,
    /// Hosting-platform preview domains, e.g. `.vercel.app`.
    pub allowed_suffix: Option<String>,
    pub fallback_origin: String,
}

impl CorsPolicy {
    pub fn allow_origin(&self, origin: Option<&str>) -> String {
        match origin {
            Some(o) if self.is_allowed(o) => o.to_string(),
            _ => self.fallback_origin.clone(),
        }
    }

    fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|a| a == origin)
            || self
                .allowed_suffix
                .as_deref()
                .is_some_and(|suffix| origin.ends_with(suffix))
    }
}

/// Stamps CORS headers on every response, computed from the request's `Origin`.
pub async fn apply_cors(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let origin = req
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let allow = state.config.cors.allow_origin(origin.as_deref());

    let mut resp = next.run(req).await;
    let headers = resp.headers_mut();
    match HeaderValue::from_str(&allow) {
        Ok(v) => {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, v);
        }
        Err(e) => warn!(error = %e, origin = %allow, "unrepresentable CORS origin"),
    }
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("POST, OPTIONS"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
    headers.insert(VARY, HeaderValue::from_static("Origin"));
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn allowed_origins_are_echoed() {
        let policy = Config::default().cors;
        assert_eq!(
            policy.allow_origin(Some("http://localhost:5173")),
            "http://localhost:5173"
        );
        assert_eq!(
            policy.allow_origin(Some("https://hidden-pg-git-main.vercel.app")),
            "https://hidden-pg-git-main.vercel.app"
        );
    }

    #[test]
    fn other_origins_get_the_production_site() {
        let policy = Config::default().cors;
        assert_eq!(
            policy.allow_origin(Some("https://evil.example")),
            "https://hiddenprincegeorge.ca"
        );
        assert_eq!(policy.allow_origin(None), "https://hiddenprincegeorge.ca");
    }

    #[test]
    fn suffix_can_be_disabled() {
        let policy = CorsPolicy {
            allowed_suffix: None,
            ..Config::default().cors
        };
        assert_eq!(
            policy.allow_origin(Some("https://preview.vercel.app")),
            "https://hiddenprincegeorge.ca"
        );
    }
}
