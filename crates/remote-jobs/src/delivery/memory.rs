use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{Acknowledgement, ApplicationTransport, DeliveryError, PostingGateway};
use crate::applications::SubmissionPayload;
use crate::catalog::store::next_sequence;
use crate::catalog::{Posting, PostingDraft, PostingId};

/// Failure the in-memory boundary should produce on the next calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedFailure {
    /// Every call fails as if the network were down.
    Unavailable,
    /// Posting calls are rejected and applications get a negative acknowledgement.
    Decline(String),
}

/// Delivery boundary kept in process memory. Backs the service in `memory` mode.
#[derive(Debug, Default)]
pub struct InMemoryDelivery {
    postings: Mutex<Vec<Posting>>,
    payloads: Mutex<Vec<SubmissionPayload>>,
    failure: Mutex<Option<ScriptedFailure>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryDelivery {
    pub fn with_postings(postings: Vec<Posting>) -> Self {
        Self {
            postings: Mutex::new(postings),
            ..Self::default()
        }
    }

    pub fn set_failure(&self, failure: Option<ScriptedFailure>) {
        *lock(&self.failure) = failure;
    }

    pub fn postings(&self) -> Vec<Posting> {
        lock(&self.postings).clone()
    }

    /// Applications accepted so far.
    pub fn payloads(&self) -> Vec<SubmissionPayload> {
        lock(&self.payloads).clone()
    }

    fn scripted(&self) -> Option<ScriptedFailure> {
        lock(&self.failure).clone()
    }

    fn posting_failure(&self) -> Result<(), DeliveryError> {
        match self.scripted() {
            None => Ok(()),
            Some(ScriptedFailure::Unavailable) => Err(DeliveryError::Transport(
                "in-memory delivery marked unavailable".to_string(),
            )),
            Some(ScriptedFailure::Decline(message)) => {
                Err(DeliveryError::Rejected {
                    status: 422,
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl PostingGateway for InMemoryDelivery {
    async fn create_posting(&self, draft: &PostingDraft) -> Result<Posting, DeliveryError> {
        self.posting_failure()?;
        let mut postings = lock(&self.postings);
        let id = PostingId::from(next_sequence(&postings));
        let posting = Posting::from_draft(id, draft.clone());
        postings.push(posting.clone());
        Ok(posting)
    }

    async fn update_posting(
        &self,
        id: &PostingId,
        draft: &PostingDraft,
    ) -> Result<Posting, DeliveryError> {
        self.posting_failure()?;
        let mut postings = lock(&self.postings);
        let entry = postings
            .iter_mut()
            .find(|posting| &posting.id == id)
            .ok_or_else(|| DeliveryError::NotFound(id.clone()))?;
        *entry = Posting::from_draft(id.clone(), draft.clone());
        Ok(entry.clone())
    }

    async fn list_postings(&self) -> Result<Vec<Posting>, DeliveryError> {
        self.posting_failure()?;
        Ok(self.postings())
    }

    async fn delete_posting(&self, id: &PostingId) -> Result<(), DeliveryError> {
        self.posting_failure()?;
        let mut postings = lock(&self.postings);
        let before = postings.len();
        postings.retain(|posting| &posting.id != id);
        if postings.len() == before {
            return Err(DeliveryError::NotFound(id.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl ApplicationTransport for InMemoryDelivery {
    async fn submit_application(
        &self,
        payload: SubmissionPayload,
    ) -> Result<Acknowledgement, DeliveryError> {
        match self.scripted() {
            Some(ScriptedFailure::Unavailable) => Err(DeliveryError::Transport(
                "in-memory delivery marked unavailable".to_string(),
            )),
            Some(ScriptedFailure::Decline(message)) => Ok(Acknowledgement::declined(message)),
            None => {
                lock(&self.payloads).push(payload);
                Ok(Acknowledgement::accepted())
            }
        }
    }
}
