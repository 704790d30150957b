// src/bin/api_server.rs

use anyhow::Context;
use product_catalog::infra::{config, logging};
use product_catalog::transport;
use product_catalog::{CatalogService, CatalogStore};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging()?;

    let settings = config::Settings::from_env()?;

    // --- Catalog Initialization ---
    // The table is regenerated on every start; nothing is served from an unseeded file.
    tracing::info!(
        path = %settings.catalog_path.display(),
        rows = %settings.seed_rows,
        "seeding catalog"
    );
    let catalog = CatalogService::new(CatalogStore::new(&settings.catalog_path));
    catalog
        .seed(settings.seed_rows)
        .await
        .with_context(|| format!("failed to seed {}", settings.catalog_path.display()))?;

    let app_state = transport::http::AppState { catalog };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    tracing::info!(addr = %settings.bind_addr, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl+C");
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
