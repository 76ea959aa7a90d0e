use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::PostingId;

/// Text fields typed into the application form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFields {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
}

/// Uploaded résumé: the declared media type travels with the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

impl ResumeFile {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("size", &self.size())
            .finish()
    }
}

/// How the résumé reached the form. Both paths go through the same acceptance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSource {
    Browse,
    Drop,
}

/// A complete application, built once validation passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub resume: ResumeFile,
}

impl Application {
    pub fn from_parts(fields: ApplicationFields, resume: ResumeFile) -> Self {
        let ApplicationFields {
            full_name,
            email,
            phone,
            cover_letter,
        } = fields;

        Self {
            full_name,
            email,
            phone,
            cover_letter,
            resume,
        }
    }
}

/// Multi-part bundle handed to the transport: the application plus its target posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub job_id: PostingId,
    pub application: Application,
}

/// Submission lifecycle of a single application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Validating,
    Invalid,
    Sending,
    Sent,
    Failed,
}

impl SubmissionState {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Invalid => "invalid",
            SubmissionState::Sending => "sending",
            SubmissionState::Sent => "sent",
            SubmissionState::Failed => "failed",
        }
    }

    pub const fn is_busy(self) -> bool {
        matches!(self, SubmissionState::Validating | SubmissionState::Sending)
    }
}
