// src/bin/api_server.rs

use cars_api::infra::config::{self, StoreBackend};
use cars_api::infra::logging;
use cars_api::transport;
use cars_api::{CarStore, InMemoryCarStore, PostgresCarStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    logging::init_logging(config::log_format());

    // --- Store Initialization ---
    let store: Arc<dyn CarStore> = match config::store_backend()? {
        StoreBackend::Postgres => {
            let max_connections = config::db_max_connections()?;
            tracing::info!(max_connections, "connecting to PostgreSQL");
            let store = PostgresCarStore::connect(&config::database_url()?, max_connections).await?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on exit");
            Arc::new(InMemoryCarStore::new())
        }
    };

    let app_state = transport::http::AppState::new(store);

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
            }
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
