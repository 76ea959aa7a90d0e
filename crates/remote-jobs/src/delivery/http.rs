use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{Acknowledgement, ApplicationTransport, DeliveryError, PostingGateway};
use crate::applications::SubmissionPayload;
use crate::catalog::{Posting, PostingDraft, PostingId};
use crate::config::DeliveryConfig;

/// REST client for the remote job board backend.
#[derive(Debug, Clone)]
pub struct HttpDelivery {
    client: Client,
    base: Url,
}

impl HttpDelivery {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, DeliveryError> {
        if base.cannot_be_a_base() {
            return Err(DeliveryError::Transport(format!(
                "'{base}' cannot be used as an API base URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn from_config(config: &DeliveryConfig) -> Result<Self, DeliveryError> {
        Self::new(config.api_url.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn posting_endpoint(&self, id: &PostingId) -> Url {
        self.endpoint(&["jobs", id.as_str()])
    }
}

fn transport(err: reqwest::Error) -> DeliveryError {
    DeliveryError::Transport(err.to_string())
}

async fn ensure_success(response: Response) -> Result<Response, DeliveryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(DeliveryError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DeliveryError> {
    let response = ensure_success(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|err| DeliveryError::Decode(err.to_string()))
}

fn not_found_as(id: &PostingId, err: DeliveryError) -> DeliveryError {
    match err {
        DeliveryError::Rejected { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            DeliveryError::NotFound(id.clone())
        }
        other => other,
    }
}

#[async_trait]
impl PostingGateway for HttpDelivery {
    async fn create_posting(&self, draft: &PostingDraft) -> Result<Posting, DeliveryError> {
        let url = self.endpoint(&["jobs"]);
        debug!(%url, "creating posting remotely");
        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn update_posting(
        &self,
        id: &PostingId,
        draft: &PostingDraft,
    ) -> Result<Posting, DeliveryError> {
        let url = self.posting_endpoint(id);
        debug!(%url, "updating posting remotely");
        let response = self
            .client
            .put(url)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await.map_err(|err| not_found_as(id, err))
    }

    async fn list_postings(&self) -> Result<Vec<Posting>, DeliveryError> {
        let response = self
            .client
            .get(self.endpoint(&["jobs"]))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn delete_posting(&self, id: &PostingId) -> Result<(), DeliveryError> {
        let response = self
            .client
            .delete(self.posting_endpoint(id))
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response)
            .await
            .map(|_| ())
            .map_err(|err| not_found_as(id, err))
    }
}

#[async_trait]
impl ApplicationTransport for HttpDelivery {
    async fn submit_application(
        &self,
        payload: SubmissionPayload,
    ) -> Result<Acknowledgement, DeliveryError> {
        let SubmissionPayload {
            job_id,
            application,
        } = payload;

        let resume = Part::bytes(application.resume.content)
            .file_name(application.resume.file_name)
            .mime_str(&application.resume.media_type)
            .map_err(transport)?;

        let form = Form::new()
            .part("resume", resume)
            .text("jobId", job_id.0)
            .text("fullName", application.full_name)
            .text("email", application.email)
            .text("phone", application.phone)
            .text("coverLetter", application.cover_letter);

        let response = self
            .client
            .post(self.endpoint(&["applications"]))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}
