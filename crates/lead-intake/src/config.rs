use hiddenpg_common::env;

use crate::cors::CorsPolicy;
use crate::error::AppError;
use crate::lead::{FormKind, HoneypotPolicy};

pub const DEFAULT_SITE_URL: &str = "https://hiddenprincegeorge.ca";
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["https://hiddenprincegeorge.ca", "http://localhost:5173"];
const DEFAULT_ORIGIN_SUFFIX: &str = ".vercel.app";
const DEFAULT_LEAD_TO: &str = "hello@hiddenprincegeorge.ca";
const DEFAULT_LEAD_FROM: &str = "Hidden PG <hello@hiddenprincegeorge.ca>";

/// Lead intake configuration loaded from environment variables.
///
/// Every setting has a hard-coded fallback so the service starts with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: String,
    /// Destination mailbox for every lead.
    pub lead_to: String,
    /// Sender identity, e.g. `Hidden PG <hello@hiddenprincegeorge.ca>`.
    pub lead_from: String,
    pub cors: CorsPolicy,
    pub honeypot: HoneypotPolicy,
}

impl Config {
    /// Optional:
    /// - `LEAD_BIND_ADDR` (default: "0.0.0.0:3000")
    /// - `LEAD_TO`, `LEAD_FROM`
    /// - `LEAD_ALLOWED_ORIGINS`: comma-separated origins echoed back by CORS
    /// - `LEAD_ORIGIN_SUFFIX`: any origin ending with this is also echoed
    ///   (default: ".vercel.app"; set empty to disable)
    /// - `SITE_URL`: CORS fallback origin (default: the production domain)
    /// - `LEAD_HONEYPOT_EXEMPT`: comma-separated form kinds that skip the honeypot check
    ///   (default: "newsletter"; set empty to exempt nothing)
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr = env::var_or("LEAD_BIND_ADDR", "0.0.0.0:3000");
        bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|_| AppError::Config(format!("LEAD_BIND_ADDR is not a socket address: {bind_addr}")))?;

        let lead_to = env::var_or("LEAD_TO", DEFAULT_LEAD_TO);
        let lead_from = env::var_or("LEAD_FROM", DEFAULT_LEAD_FROM);

        let cors = CorsPolicy {
            allowed_origins: env::list_or("LEAD_ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS),
            allowed_suffix: match std::env::var("LEAD_ORIGIN_SUFFIX") {
                Ok(v) => Some(v.trim().to_string()).filter(|s| !s.is_empty()),
                Err(_) => Some(DEFAULT_ORIGIN_SUFFIX.to_string()),
            },
            fallback_origin: env::var_or("SITE_URL", DEFAULT_SITE_URL)
                .trim_end_matches('/')
                .to_string(),
        };

        let honeypot = HoneypotPolicy {
            exempt: env::list_or("LEAD_HONEYPOT_EXEMPT", &["newsletter"])
                .iter()
                .map(|s| FormKind::parse(s))
                .collect(),
        };

        Ok(Self {
            bind_addr,
            lead_to,
            lead_from,
            cors,
            honeypot,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            lead_to: DEFAULT_LEAD_TO.to_string(),
            lead_from: DEFAULT_LEAD_FROM.to_string(),
            cors: CorsPolicy {
                allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
                allowed_suffix: Some(DEFAULT_ORIGIN_SUFFIX.to_string()),
                fallback_origin: DEFAULT_SITE_URL.to_string(),
            },
            honeypot: HoneypotPolicy::default(),
        }
    }
}
