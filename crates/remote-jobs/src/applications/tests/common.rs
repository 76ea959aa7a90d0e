use std::future;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::applications::{ApplicationForm, ResumeFile, ResumeSource, SubmissionPayload};
use crate::catalog::{default_postings, Posting};
use crate::delivery::{Acknowledgement, ApplicationTransport, DeliveryError};

pub(super) fn posting() -> Posting {
    default_postings().remove(0)
}

pub(super) fn pdf(size: usize) -> ResumeFile {
    ResumeFile::new("cv.pdf", "application/pdf", vec![0u8; size])
}

pub(super) fn filled_form() -> ApplicationForm {
    let form = ApplicationForm::new(&posting());
    form.edit(|fields| {
        fields.full_name = "Ada Lovelace".to_string();
        fields.email = "ada@example.com".to_string();
        fields.phone = "+44 20 7946 0000".to_string();
        fields.cover_letter = "I would love to build interfaces with you.".to_string();
    });
    form.select_resume(pdf(2048), ResumeSource::Browse)
        .expect("pdf accepted");
    form
}

/// Accepts everything and keeps what it received.
#[derive(Debug, Default)]
pub(super) struct RecordingTransport {
    pub(super) received: Mutex<Vec<SubmissionPayload>>,
}

#[async_trait]
impl ApplicationTransport for RecordingTransport {
    async fn submit_application(
        &self,
        payload: SubmissionPayload,
    ) -> Result<Acknowledgement, DeliveryError> {
        self.received.lock().expect("lock").push(payload);
        Ok(Acknowledgement::accepted())
    }
}

/// Fails like a request that timed out.
#[derive(Debug, Default)]
pub(super) struct TimingOutTransport;

#[async_trait]
impl ApplicationTransport for TimingOutTransport {
    async fn submit_application(
        &self,
        _payload: SubmissionPayload,
    ) -> Result<Acknowledgement, DeliveryError> {
        Err(DeliveryError::Transport("operation timed out".to_string()))
    }
}

/// Answers with a negative acknowledgement.
#[derive(Debug, Default)]
pub(super) struct DecliningTransport;

#[async_trait]
impl ApplicationTransport for DecliningTransport {
    async fn submit_application(
        &self,
        _payload: SubmissionPayload,
    ) -> Result<Acknowledgement, DeliveryError> {
        Ok(Acknowledgement::declined("posting closed"))
    }
}

/// Holds every send until the gate is opened.
#[derive(Debug, Default)]
pub(super) struct GatedTransport {
    pub(super) gate: Notify,
}

#[async_trait]
impl ApplicationTransport for GatedTransport {
    async fn submit_application(
        &self,
        _payload: SubmissionPayload,
    ) -> Result<Acknowledgement, DeliveryError> {
        self.gate.notified().await;
        Ok(Acknowledgement::accepted())
    }
}

/// Never answers.
#[derive(Debug, Default)]
pub(super) struct SilentTransport;

#[async_trait]
impl ApplicationTransport for SilentTransport {
    async fn submit_application(
        &self,
        _payload: SubmissionPayload,
    ) -> Result<Acknowledgement, DeliveryError> {
        future::pending().await
    }
}
