use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::board::JobBoard;
use crate::catalog::{
    default_postings, CatalogStore, ContractType, ExperienceLevel, PostingDraft, SyncedCatalog,
};
use crate::delivery::InMemoryDelivery;

pub(super) type MemoryBoard = JobBoard<InMemoryDelivery, InMemoryDelivery>;

pub(super) fn build_board() -> (Arc<MemoryBoard>, Arc<InMemoryDelivery>) {
    let delivery = Arc::new(InMemoryDelivery::with_postings(default_postings()));
    let catalog = SyncedCatalog::new(
        CatalogStore::with_postings(default_postings()),
        delivery.clone(),
    );
    (Arc::new(JobBoard::new(catalog, delivery.clone())), delivery)
}

pub(super) fn draft() -> PostingDraft {
    PostingDraft {
        title: "Platform Engineer".to_string(),
        company: "Fjord Cloud".to_string(),
        location: "Remote - Nordics".to_string(),
        salary: "70k €".to_string(),
        contract_type: ContractType::Contract,
        level: ExperienceLevel::Senior,
        description: "Run the Kubernetes fleet.".to_string(),
        requirements: vec!["Kubernetes".to_string()],
        posted_at: NaiveDate::from_ymd_opt(2024, 3, 20).expect("valid date"),
        company_logo: "https://fjord.example/logo.png".to_string(),
        contact_email: "jobs@fjord.example".to_string(),
    }
}

pub(super) const BOUNDARY: &str = "remote-jobs-test-boundary";

/// Multi-part body with plain text parts and an optional `resume` file part.
pub(super) fn multipart_request(
    fields: &[(&str, &str)],
    resume: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, media_type, content)) = resume {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: {media_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/applications")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

pub(super) fn applicant_fields(job_id: &str) -> Vec<(&str, &str)> {
    vec![
        ("jobId", job_id),
        ("fullName", "Grace Hopper"),
        ("email", "grace@example.com"),
        ("phone", "+1 555 0100"),
        ("coverLetter", "Compilers are my thing."),
    ]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
