use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, path::Path, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    catalog::{self, DefaultPlanMap, PriceCatalog},
    config::Config,
    handlers, metrics,
    signals::setup_signal_handlers,
    store::DiagnosisStore,
};

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<PriceCatalog>,
    pub defaults: Arc<DefaultPlanMap>,
    pub http_client: reqwest::Client,
    pub store: Arc<DiagnosisStore>,
}

/// Start the cost-diagnosis server
///
/// This function:
/// 1. Initializes metrics
/// 2. Loads the price catalog and default-plan map
/// 3. Opens the diagnosis database
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config) -> Result<()> {
    info!("Initializing Prometheus metrics...");
    let metrics_handle = Arc::new(metrics::init_metrics());

    // Reference data is loaded once and never mutated afterwards.
    let price_catalog = catalog::load_catalog(Path::new(&config.catalog.services_file))?;
    let default_plans = catalog::load_default_plans(Path::new(&config.catalog.default_plans_file))?;

    let store = DiagnosisStore::connect(&config.database.url).await?;

    // Setup signal handlers (SIGTERM, SIGINT for shutdown)
    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!(
        "Bundle: {} at ¥{}/user/year; Gemini {}; email webhook {}",
        config.bundle.product_name,
        config.bundle.price_per_user_per_year,
        if config.gemini.enabled { "enabled" } else { "disabled" },
        if config.email.enabled { "enabled" } else { "disabled" },
    );

    let state = AppState {
        config: Arc::new(config),
        catalog: Arc::new(price_catalog),
        defaults: Arc::new(default_plans),
        http_client: reqwest::Client::new(),
        store: Arc::new(store),
    };

    let app = create_router(state, metrics_handle);

    info!("Starting cost-diagnosis server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    state: AppState,
    metrics_handle: Arc<metrics_exporter_prometheus::PrometheusHandle>,
) -> Router {
    let api_routes = Router::new()
        .route("/api/diagnose", post(handlers::diagnose::diagnose))
        .route(
            "/api/generate-comparison",
            post(handlers::comparison::generate_comparison),
        )
        .route("/api/results", post(handlers::results::save_result))
        .route("/api/results/:id", get(handlers::results::get_result))
        .route("/api/send-email", post(handlers::email::send_email))
        .with_state(state);

    Router::new()
        // Operational endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics_handler::metrics))
        .with_state(metrics_handle)
        .merge(api_routes)
        // Form submissions are small; anything bigger is not a form.
        .layer(DefaultBodyLimit::max(1024 * 1024))
        // The form frontend is served from a different origin.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
