use mime::Mime;

/// 5 MiB.
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

pub const ACCEPTED_RESUME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileRejection {
    #[error("unsupported file format '{media_type}': use PDF or DOC/DOCX")]
    UnsupportedMediaType { media_type: String },
    #[error("file is too large ({size} bytes): maximum size is {max} bytes")]
    TooLarge { size: u64, max: u64 },
}

/// Acceptance rules for résumé uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePolicy {
    accepted: Vec<String>,
    max_bytes: u64,
}

impl Default for ResumePolicy {
    fn default() -> Self {
        Self::new(ACCEPTED_RESUME_TYPES, MAX_RESUME_BYTES)
    }
}

impl ResumePolicy {
    pub fn new<I, S>(accepted: I, max_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            accepted: accepted
                .into_iter()
                .map(|media_type| media_type.as_ref().trim().to_ascii_lowercase())
                .collect(),
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn accepted_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.accepted.iter().map(String::as_str)
    }

    /// Media type is checked before size; the limit itself is inclusive.
    pub fn check(&self, media_type: &str, size: u64) -> Result<(), FileRejection> {
        let essence = media_type
            .parse::<Mime>()
            .map(|parsed| parsed.essence_str().to_ascii_lowercase())
            .ok();

        let accepted = essence
            .as_deref()
            .is_some_and(|essence| self.accepted.iter().any(|known| known == essence));
        if !accepted {
            return Err(FileRejection::UnsupportedMediaType {
                media_type: media_type.to_string(),
            });
        }

        if size > self.max_bytes {
            return Err(FileRejection::TooLarge {
                size,
                max: self.max_bytes,
            });
        }

        Ok(())
    }
}
