#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use axum_prometheus::PrometheusMetricLayer;
use circleview_api::{
    api,
    config::Config,
    rest::ApiDoc,
    upstream::{ClientProvider, ClientSource},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    // Set up logging from config
    std::env::set_var("RUST_LOG", &config.logging.level);
    tracing_subscriber::fmt::init();

    // Init banner so container logs clearly show startup
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "circleview-api starting up"
    );

    // Per-request upstream clients all share this provider's connection pool
    let provider = ClientProvider::new(&config.upstream)?;
    if config.upstream.token.is_some() {
        tracing::info!("default upstream token configured - requests may omit Authorization");
    } else {
        tracing::info!("no default upstream token - every request must carry a bearer token");
    }
    let source: Arc<dyn ClientSource> = Arc::new(provider);

    // Build CORS layer from config
    let cors_origins = &config.cors.allowed_origins;
    let allow_origin: AllowOrigin = if cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow any origin - not recommended for production");
        AllowOrigin::any()
    } else if cors_origins.is_empty() {
        tracing::info!(
            "CORS allowed origins not configured - cross-origin requests will be blocked"
        );
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        tracing::info!(origins = ?cors_origins, "CORS allowed origins configured");
        AllowOrigin::list(origins)
    };

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    // Build the API
    let mut app = Router::new()
        .nest("/api/v1", api::router())
        .route("/health", get(api::health_check))
        .route("/metrics", get(move || async move { metric_handle.render() }))
        .layer(Extension(source))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any)
                .allow_origin(allow_origin),
        );

    // Swagger UI is opt-in via config
    if config.swagger.enabled {
        tracing::info!("Swagger UI enabled at /swagger-ui");
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    // Start the server
    let ip: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.host '{}': {e}", config.server.host))?;
    let addr = SocketAddr::from((ip, config.server.port));
    tracing::info!("Starting server at http://{}/api/v1", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
