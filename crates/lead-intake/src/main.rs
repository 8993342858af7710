mod config;
mod cors;
mod error;
mod lead;
mod server;
mod template;

use std::sync::Arc;

use hiddenpg_common::email::{ResendClient, ResendClientConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::AppError;
use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting lead-intake server");

    let config = Config::from_env()?;
    let honeypot_exempt: Vec<&str> = config.honeypot.exempt.iter().map(|k| k.as_str()).collect();
    info!(
        bind_addr = %config.bind_addr,
        lead_to = %config.lead_to,
        allowed_origins = ?config.cors.allowed_origins,
        honeypot_exempt = ?honeypot_exempt,
        "configuration loaded"
    );

    let resend_config = ResendClientConfig::from_env().map_err(AppError::from)?;
    if resend_config.api_key.is_empty() {
        tracing::warn!("RESEND_API_KEY is not set, every delivery will be rejected");
    }
    info!(
        base_url = %resend_config.base_url,
        timeout_ms = resend_config.timeout.as_millis(),
        "email provider configured"
    );
    let mailer = Arc::new(ResendClient::new(resend_config).map_err(AppError::from)?);

    let bind_addr = config.bind_addr.clone();
    let app = server::router(AppState::new(config, mailer));

    let listener = TcpListener::bind(&bind_addr).await?;
    info!(listen_addr = %bind_addr, path = server::LEAD_PATH, "lead intake ready");
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })?;

    info!("lead-intake shut down");
    Ok(())
}
