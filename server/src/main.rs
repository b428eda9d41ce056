mod api;
mod auth;
mod config;
mod db;
mod models;
mod schema;
mod uploads;
mod validation;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use config::{Config, UploadConfig};
use std::env;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
pub struct AppContext {
    pub pool: db::DbPool,
    pub uploader: uploads::Uploader,
}

pub type AppState = Arc<AppContext>;

fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    init_telemetry();

    let config = Config::load();

    let pool = db::create_pool(&config.database_url);
    let uploader = uploads::Uploader::from_config(&config.upload).await;

    let state: AppState = Arc::new(AppContext { pool, uploader });

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let mut app = Router::new()
        .nest("/api", api::auth::router())
        .nest(
            "/api/user",
            api::users::router().merge(api::favorites::user_router()),
        )
        .nest(
            "/api/recipes",
            api::recipes::router()
                .merge(api::ratings::router())
                .merge(api::comments::router())
                .merge(api::favorites::recipe_router()),
        )
        .nest("/api/categories", api::categories::router())
        .nest("/api/ingredients", api::ingredients::router())
        .nest(
            "/api/dietary-restrictions",
            api::dietary_restrictions::router(),
        )
        .merge(swagger_ui)
        .with_state(state);

    // Locally stored uploads are served straight from disk
    if let UploadConfig::Local { dir } = &config.upload {
        app = app.nest_service("/uploads", ServeDir::new(dir));
    }

    let app = app.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>,
                 latency: std::time::Duration,
                 _span: &Span| {
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request failed with server error"
                        );
                    } else {
                        tracing::info!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    }
                },
            )
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: std::time::Duration,
                 _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("Swagger UI available at /swagger-ui/");

    axum::serve(listener, app).await.unwrap();
}
