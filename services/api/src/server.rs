use crate::cli::ServeArgs;
use crate::infra::{
    AppState, AuditBundle, InMemoryAuditRepository, InMemoryManagerDirectory, LoggingMailer,
};
use crate::routes::with_audit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use food_audit::config::AppConfig;
use food_audit::error::AppError;
use food_audit::notify::import_accounts_from_path;
use food_audit::report::AuditReportService;
use food_audit::telemetry;
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

    let repository = Arc::new(InMemoryAuditRepository::default());
    let directory = Arc::new(InMemoryManagerDirectory::default());
    for path in &args.bundles {
        let bundle = AuditBundle::from_path(path)?;
        info!(audit_id = %bundle.audit.audit_id, path = %path.display(), "loaded audit bundle");
        repository.load(&bundle);
        directory.upsert(bundle.managers);
    }
    if let Some(path) = &args.managers {
        let accounts = import_accounts_from_path(path)?;
        info!(count = accounts.len(), path = %path.display(), "loaded manager directory");
        directory.upsert(accounts);
    }

    let service = Arc::new(AuditReportService::new(
        repository,
        directory,
        Arc::new(LoggingMailer::default()),
        config.notifications.message_settings(),
    ));

    let app = with_audit_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "food safety audit service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
