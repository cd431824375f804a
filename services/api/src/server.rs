use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAlertPublisher, InMemoryAthleteRepository};
use crate::routes::with_roster_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use roster_desk::config::AppConfig;
use roster_desk::error::AppError;
use roster_desk::roster::{RosterImporter, RosterService};
use roster_desk::telemetry;
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

    let scoring_config = config.scholarships.scoring_config()?;
    let roster = match args.roster.take() {
        Some(path) => RosterImporter::from_path(&path, &scoring_config.thresholds)?,
        None => Vec::new(),
    };

    let repository = Arc::new(InMemoryAthleteRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let roster_service = Arc::new(RosterService::new(repository, alerts, scoring_config));
    let seeded = roster_service.seed(roster)?;

    let app = with_roster_routes(roster_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, seeded, "roster desk ready");

    axum::serve(listener, app).await?;
    Ok(())
}
