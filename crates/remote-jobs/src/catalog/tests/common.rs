use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::catalog::{
    default_postings, ContractType, ExperienceLevel, Posting, PostingDraft, PostingId,
};
use crate::delivery::{DeliveryError, PostingGateway};

pub(super) fn posted_at() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).expect("valid date")
}

pub(super) fn valid_draft(title: &str) -> PostingDraft {
    PostingDraft {
        title: title.to_string(),
        company: "Northwind Remote".to_string(),
        location: "Remote - Québec".to_string(),
        salary: "70-90k $".to_string(),
        contract_type: ContractType::Contract,
        level: ExperienceLevel::Senior,
        description: "Own the billing platform end to end.".to_string(),
        requirements: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        posted_at: posted_at(),
        company_logo: "https://example.com/logo.png".to_string(),
        contact_email: "hiring@northwind.example".to_string(),
    }
}

pub(super) fn posting(id: &str, title: &str) -> Posting {
    Posting::from_draft(PostingId(id.to_string()), valid_draft(title))
}

pub(super) fn two_postings() -> Vec<Posting> {
    default_postings().into_iter().take(2).collect()
}

/// Gateway that accepts everything and counts the calls it receives.
#[derive(Debug, Default)]
pub(super) struct CountingGateway {
    pub(super) creates: AtomicUsize,
    pub(super) updates: AtomicUsize,
}

#[async_trait]
impl PostingGateway for CountingGateway {
    async fn create_posting(&self, draft: &PostingDraft) -> Result<Posting, DeliveryError> {
        let count = self.creates.fetch_add(1, Ordering::SeqCst) as u64;
        Ok(Posting::from_draft(PostingId::from(count + 100), draft.clone()))
    }

    async fn update_posting(
        &self,
        id: &PostingId,
        draft: &PostingDraft,
    ) -> Result<Posting, DeliveryError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(Posting::from_draft(id.clone(), draft.clone()))
    }

    async fn list_postings(&self) -> Result<Vec<Posting>, DeliveryError> {
        Ok(default_postings())
    }

    async fn delete_posting(&self, _id: &PostingId) -> Result<(), DeliveryError> {
        Ok(())
    }
}

/// Gateway whose every call fails like an unreachable backend.
#[derive(Debug, Default)]
pub(super) struct UnreachableGateway;

#[async_trait]
impl PostingGateway for UnreachableGateway {
    async fn create_posting(&self, _draft: &PostingDraft) -> Result<Posting, DeliveryError> {
        Err(DeliveryError::Transport("connection refused".to_string()))
    }

    async fn update_posting(
        &self,
        _id: &PostingId,
        _draft: &PostingDraft,
    ) -> Result<Posting, DeliveryError> {
        Err(DeliveryError::Transport("connection refused".to_string()))
    }

    async fn list_postings(&self) -> Result<Vec<Posting>, DeliveryError> {
        Err(DeliveryError::Transport("connection refused".to_string()))
    }

    async fn delete_posting(&self, _id: &PostingId) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("connection refused".to_string()))
    }
}
