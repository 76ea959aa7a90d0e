use crate::cli::ServeArgs;
use crate::infra::{seed_postings, AppState};
use crate::routes::with_board_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use remote_jobs::board::JobBoard;
use remote_jobs::catalog::{CatalogStore, SyncedCatalog};
use remote_jobs::config::{AppConfig, DeliveryMode};
use remote_jobs::delivery::{
    ApplicationTransport, HttpDelivery, InMemoryDelivery, PostingGateway,
};
use remote_jobs::error::AppError;
use remote_jobs::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed_csv) = args.seed_csv.take() {
        config.catalog.seed_csv = Some(seed_csv);
    }

    telemetry::init(&config.telemetry)?;

    match config.delivery.mode {
        DeliveryMode::Memory => {
            let postings = seed_postings(config.catalog.seed_csv.as_deref())?;
            let delivery = Arc::new(InMemoryDelivery::with_postings(postings));
            serve(config, delivery.clone(), delivery).await
        }
        DeliveryMode::Http => {
            if let Some(path) = &config.catalog.seed_csv {
                warn!(path = %path.display(), "catalog seed ignored; postings come from the backend");
            }
            let delivery = Arc::new(HttpDelivery::from_config(&config.delivery)?);
            serve(config, delivery.clone(), delivery).await
        }
    }
}

async fn serve<G, T>(config: AppConfig, gateway: Arc<G>, transport: Arc<T>) -> Result<(), AppError>
where
    G: PostingGateway + 'static,
    T: ApplicationTransport + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = SyncedCatalog::new(CatalogStore::new(), gateway);
    let board = Arc::new(JobBoard::new(catalog, transport));
    let postings = board.load().await?;

    let app = with_board_routes(board)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        mode = ?config.delivery.mode,
        postings,
        %addr,
        "remote job board ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
