use metrics_exporter_prometheus::PrometheusHandle;
use remote_jobs::catalog::{
    default_postings, import_postings_from_path, ContractType, ExperienceLevel, Posting,
};
use remote_jobs::error::AppError;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Postings from the seed file when one is given, otherwise the built-in sample catalog.
pub(crate) fn seed_postings(seed_csv: Option<&Path>) -> Result<Vec<Posting>, AppError> {
    match seed_csv {
        Some(path) => {
            let postings = import_postings_from_path(path)?;
            info!(path = %path.display(), count = postings.len(), "catalog seed imported");
            Ok(postings)
        }
        None => Ok(default_postings()),
    }
}

pub(crate) fn parse_contract_type(raw: &str) -> Result<ContractType, String> {
    raw.parse()
}

pub(crate) fn parse_experience_level(raw: &str) -> Result<ExperienceLevel, String> {
    raw.parse()
}
