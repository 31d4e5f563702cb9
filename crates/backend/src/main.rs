pub mod api;
pub mod dashboards;
pub mod routes;
pub mod shared;
pub mod usecases;

use contracts::usecases::u510_generate_sample_data::GenerateSampleDataRequest;

use crate::shared::app_state::AppState;
use crate::usecases::u510_generate_sample_data::SampleDataExecutor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Простой middleware для логирования запросов
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = next.run(req).await;

        tracing::info!(
            "{} {} {} | {}ms",
            response.status().as_u16(),
            method,
            uri.path(),
            start.elapsed().as_millis()
        );
        response
    }

    let config = shared::config::load_config()?;
    let port = config.server.port;
    let sample_data = config.sample_data.clone();
    let state = AppState::new(config);

    if sample_data.generate_if_missing && !state.snapshots.source().all_files_exist() {
        tracing::warn!("Snapshot files missing, generating sample data");
        let executor = SampleDataExecutor::new(state.snapshots.source().clone());
        executor.execute(&GenerateSampleDataRequest {
            seed: sample_data.seed,
            velocity_rows: None,
        })?;
    }

    // Warm the cache so the first dashboard request does not pay for the load
    if let Err(e) = state.snapshots.get() {
        tracing::error!("Initial snapshot load failed: {:#}", e);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
