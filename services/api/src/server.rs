use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryListingRepository};
use crate::routes::with_platform_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use estate_desk::config::AppConfig;
use estate_desk::error::AppError;
use estate_desk::telemetry;
use estate_desk::workflows::chat::ChatLog;
use estate_desk::workflows::listings::ListingService;
use estate_desk::workflows::sessions::AccessPolicy;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryListingRepository::default());
    let listing_service = Arc::new(ListingService::new(repository));
    let access_policy = Arc::new(AccessPolicy::from_config(&config.sessions));
    let chat_log = Arc::new(ChatLog::default());

    let app = with_platform_routes(listing_service, access_policy, chat_log)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "listing platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}
