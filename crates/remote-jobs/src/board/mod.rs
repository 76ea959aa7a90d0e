//! Job board facade: one catalog and one application transport shared by the HTTP routes.

pub mod router;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::applications::{
    Application, ApplicationFields, ApplicationForm, ResumeFile, ResumePolicy, ResumeSource,
    SubmitError,
};
use crate::catalog::{CatalogError, FilterCriteria, Posting, PostingDraft, PostingId, SyncedCatalog};
use crate::delivery::{ApplicationTransport, PostingGateway};

pub use router::job_board_router;

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("posting {0} not found")]
    UnknownPosting(PostingId),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Serialises catalog mutations behind an async lock so each create or update is fully applied
/// (or rolled back) before the next read observes the catalog.
pub struct JobBoard<G: ?Sized, T: ?Sized> {
    catalog: Mutex<SyncedCatalog<G>>,
    transport: Arc<T>,
    policy: ResumePolicy,
}

impl<G, T> JobBoard<G, T>
where
    G: PostingGateway + ?Sized,
    T: ApplicationTransport + ?Sized,
{
    pub fn new(catalog: SyncedCatalog<G>, transport: Arc<T>) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            transport,
            policy: ResumePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ResumePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ResumePolicy {
        &self.policy
    }

    pub async fn load(&self) -> Result<usize, CatalogError> {
        self.catalog.lock().await.load().await
    }

    pub async fn list(&self, criteria: &FilterCriteria) -> Vec<Posting> {
        let catalog = self.catalog.lock().await;
        catalog
            .store()
            .filter(criteria)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &PostingId) -> Option<Posting> {
        self.catalog.lock().await.get(id).cloned()
    }

    pub async fn create(&self, draft: PostingDraft) -> Result<Posting, CatalogError> {
        self.catalog.lock().await.create(draft).await
    }

    pub async fn update(&self, posting: Posting) -> Result<Posting, CatalogError> {
        self.catalog.lock().await.update(posting).await
    }

    /// Fresh form targeting an existing posting.
    pub async fn open_application(&self, job_id: &PostingId) -> Result<ApplicationForm, ApplyError> {
        let catalog = self.catalog.lock().await;
        let posting = catalog
            .get(job_id)
            .ok_or_else(|| ApplyError::UnknownPosting(job_id.clone()))?;
        Ok(ApplicationForm::with_policy(posting, self.policy.clone()))
    }

    /// One-shot application as received from an upload: fill a new form and submit it.
    pub async fn apply(
        &self,
        job_id: &PostingId,
        fields: ApplicationFields,
        resume: Option<ResumeFile>,
    ) -> Result<Application, ApplyError> {
        let form = self.open_application(job_id).await?;
        form.edit(|entered| *entered = fields);
        if let Some(file) = resume {
            if let Err(rejection) = form.select_resume(file, ResumeSource::Browse) {
                debug!(%job_id, %rejection, "uploaded résumé rejected");
            }
        }

        Ok(form.submit(self.transport.as_ref()).await?)
    }
}
