use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{Posting, PostingDraft, PostingId};
use super::store::CatalogStore;
use super::validation::PostingField;
use crate::delivery::{DeliveryError, PostingGateway};
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError<PostingField>),
    #[error("posting delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Catalog store whose mutations are confirmed by a [`PostingGateway`].
///
/// A mutation is applied locally first and stays provisional until the gateway acknowledges
/// it; any gateway error rolls the local change back. Identifiers assigned by the gateway win
/// over the ones the store proposed.
pub struct SyncedCatalog<G: ?Sized> {
    store: CatalogStore,
    gateway: Arc<G>,
}

impl<G> SyncedCatalog<G>
where
    G: PostingGateway + ?Sized,
{
    pub fn new(store: CatalogStore, gateway: Arc<G>) -> Self {
        Self { store, gateway }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn list(&self) -> &[Posting] {
        self.store.list()
    }

    pub fn get(&self, id: &PostingId) -> Option<&Posting> {
        self.store.get(id)
    }

    /// Replace local state with the gateway's postings.
    pub async fn load(&mut self) -> Result<usize, CatalogError> {
        let postings = self.gateway.list_postings().await?;
        self.store = CatalogStore::with_postings(postings);
        info!(count = self.store.len(), "catalog loaded from delivery boundary");
        Ok(self.store.len())
    }

    pub async fn create(&mut self, draft: PostingDraft) -> Result<Posting, CatalogError> {
        let posting = self.store.create(draft)?;

        match self
            .gateway
            .create_posting(&PostingDraft::from(&posting))
            .await
        {
            Ok(remote) => {
                if remote.id == posting.id {
                    return Ok(posting);
                }
                if !self.store.adopt_identifier(&posting.id, remote.id.clone()) {
                    warn!(local = %posting.id, remote = %remote.id, "gateway identifier already in use");
                    self.store.retract_created(&posting.id);
                    return Err(DeliveryError::IdentifierClash(remote.id).into());
                }
                debug!(local = %posting.id, remote = %remote.id, "adopted gateway identifier");
                Ok(Posting {
                    id: remote.id,
                    ..posting
                })
            }
            Err(error) => {
                warn!(id = %posting.id, %error, "rolling back provisional posting");
                self.store.retract_created(&posting.id);
                Err(error.into())
            }
        }
    }

    /// Unknown identifiers keep the store's no-op contract and are not sent to the gateway.
    pub async fn update(&mut self, posting: Posting) -> Result<Posting, CatalogError> {
        let previous = self.store.get(&posting.id).cloned();
        let updated = self.store.update(posting)?;

        let Some(previous) = previous else {
            return Ok(updated);
        };

        match self
            .gateway
            .update_posting(&updated.id, &PostingDraft::from(&updated))
            .await
        {
            Ok(_) => Ok(updated),
            Err(error) => {
                warn!(id = %updated.id, %error, "restoring posting after failed update");
                self.store.restore(previous);
                Err(error.into())
            }
        }
    }
}
