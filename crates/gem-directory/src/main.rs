mod catalog;
mod config;
mod error;
mod filter;
mod model;
mod search;
mod server;
mod sitemap;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use config::Config;
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

    info!("starting gem-directory server");

    let config = Config::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        site_url = %config.site_url,
        suggestion_limit = config.suggestion_limit,
        "configuration loaded"
    );

    let catalog = match &config.gems_data_path {
        Some(path) => {
            info!(path = %path.display(), "loading gem catalog from file");
            Catalog::from_path(path)?
        }
        None => Catalog::embedded()?,
    };
    info!(
        gems = catalog.len(),
        categories = catalog.categories().len(),
        "gem catalog loaded"
    );
    if catalog.is_empty() {
        tracing::warn!("gem catalog is empty");
    }

    let bind_addr = config.bind_addr.clone();
    let app = server::router(AppState::new(catalog, config));

    let listener = TcpListener::bind(&bind_addr).await?;
    info!(listen_addr = %bind_addr, "gem directory ready");
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })?;

    info!("gem-directory shut down");
    Ok(())
}
