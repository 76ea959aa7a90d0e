//! Outbound boundary that persists postings and delivers applications.
//!
//! The core only decides what is sent and how failures are read; any error or a negative
//! acknowledgement is treated the same way by callers.

mod http;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::applications::SubmissionPayload;
use crate::catalog::{Posting, PostingDraft, PostingId};

pub use http::HttpDelivery;
pub use memory::{InMemoryDelivery, ScriptedFailure};

/// Remote persistence for catalog postings.
#[async_trait]
pub trait PostingGateway: Send + Sync {
    async fn create_posting(&self, draft: &PostingDraft) -> Result<Posting, DeliveryError>;
    async fn update_posting(
        &self,
        id: &PostingId,
        draft: &PostingDraft,
    ) -> Result<Posting, DeliveryError>;
    async fn list_postings(&self) -> Result<Vec<Posting>, DeliveryError>;
    async fn delete_posting(&self, id: &PostingId) -> Result<(), DeliveryError>;
}

/// Transport handing a multi-part application to the employer.
#[async_trait]
pub trait ApplicationTransport: Send + Sync {
    async fn submit_application(
        &self,
        payload: SubmissionPayload,
    ) -> Result<Acknowledgement, DeliveryError>;
}

/// Response body of the application endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Acknowledgement {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("delivery transport unavailable: {0}")]
    Transport(String),
    #[error("delivery rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("posting {0} not found at the delivery boundary")]
    NotFound(PostingId),
    #[error("unable to decode delivery response: {0}")]
    Decode(String),
    #[error("delivery boundary assigned identifier {0}, already used by another posting")]
    IdentifierClash(PostingId),
}
