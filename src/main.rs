use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use multirecruit_backend::{
    config::{get_config, init_config},
    routes,
    store::client::DataClient,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let data = DataClient::new(&config.data_api_url, &config.data_api_key)?;
    let app_state = AppState::new(data);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/public/jobs", get(routes::jobs::search_jobs))
        .route(
            "/api/public/jobs/featured",
            get(routes::jobs::list_featured_jobs),
        )
        .route(
            "/api/public/jobs/recommended",
            get(routes::jobs::list_recommended_jobs),
        )
        .route("/api/public/jobs/:slug", get(routes::jobs::get_job))
        .route(
            "/api/public/jobs/:slug/apply",
            post(routes::jobs::apply_to_job),
        )
        .route(
            "/api/account/:user_id/applications",
            get(routes::applications::list_user_applications),
        )
        .route(
            "/api/account/:user_id/applications/:id",
            get(routes::applications::get_user_application),
        )
        .layer(axum::middleware::from_fn_with_state(
            multirecruit_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            multirecruit_backend::middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/jobs",
            get(routes::admin::list_jobs).post(routes::admin::create_job),
        )
        .route(
            "/api/admin/jobs/:id",
            get(routes::admin::get_job).patch(routes::admin::update_job),
        )
        .route(
            "/api/admin/applications",
            get(routes::admin::list_applications),
        )
        .route(
            "/api/admin/applications/:id",
            get(routes::admin::get_application),
        )
        .route(
            "/api/admin/applications/:id/status",
            axum::routing::patch(routes::admin::update_application_status),
        )
        .layer(axum::middleware::from_fn_with_state(
            multirecruit_backend::middleware::rate_limit::new_rps_state(config.admin_rps),
            multirecruit_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
