use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tariff_tracker::{api, config::Config, ProductCatalog, TariffRateSource, UsitcHtsSource};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Configuration error")?;

    let catalog = ProductCatalog::load(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog {}", config.catalog_path))?;
    let tariff_source: Arc<dyn TariffRateSource> = Arc::new(
        UsitcHtsSource::new(config.hts_data_url.clone(), config.hts_timeout)
            .context("Failed to build HTS client")?,
    );

    let addr = SocketAddr::new(config.host, config.port);
    let app = api::create_router(api::AppState::new(
        config,
        Arc::new(catalog),
        tariff_source,
    ));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
