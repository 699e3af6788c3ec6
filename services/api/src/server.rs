use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use job_application::config::AppConfig;
use job_application::error::AppError;
use job_application::telemetry;
use job_application::workflows::application::ApplicationFormService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let repository = Arc::new(InMemorySessionRepository::with_ttl(config.sessions.ttl()));
    spawn_session_sweeper(repository.clone());
    let form_service = Arc::new(ApplicationFormService::new(
        repository,
        config.posting.clone(),
    ));

    let app = with_application_routes(form_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        job_title = %config.posting.job_title,
        session_ttl_minutes = config.sessions.ttl_minutes,
        "application form ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

const SESSION_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Purge expired sessions on a timer so idle processes release memory without new inserts.
fn spawn_session_sweeper(repository: Arc<InMemorySessionRepository>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = repository.purge_expired(Utc::now());
            if removed > 0 {
                info!(removed, remaining = repository.len(), "expired sessions purged");
            }
        }
    });
}
