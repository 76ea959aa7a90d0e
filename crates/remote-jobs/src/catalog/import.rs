use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use super::domain::{ContractType, ExperienceLevel, Posting, PostingDraft, PostingId};
use super::validation::{validate_draft, PostingField};
use crate::validation::ValidationError;

const REQUIREMENT_SEPARATOR: char = '|';

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("unable to open catalog seed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
    #[error("row {row}: {source}")]
    Invalid {
        row: usize,
        source: ValidationError<PostingField>,
    },
    #[error("row {row}: duplicate posting id '{id}'")]
    DuplicateId { row: usize, id: PostingId },
}

#[derive(Debug, Deserialize)]
struct PostingRow {
    id: String,
    title: String,
    company: String,
    location: String,
    salary: String,
    #[serde(rename = "type")]
    contract_type: String,
    level: String,
    description: String,
    requirements: String,
    posted_at: String,
    company_logo: String,
    contact_email: String,
}

impl PostingRow {
    fn into_posting(self, row: usize) -> Result<Posting, ImportError> {
        let invalid = |reason: String| ImportError::InvalidRow { row, reason };

        let contract_type: ContractType = self.contract_type.parse().map_err(invalid)?;
        let level: ExperienceLevel = self.level.parse().map_err(invalid)?;
        let posted_at =
            NaiveDate::parse_from_str(self.posted_at.trim(), "%Y-%m-%d").map_err(|err| {
                invalid(format!(
                    "posted_at '{}' is not YYYY-MM-DD ({err})",
                    self.posted_at
                ))
            })?;

        let id = self.id.trim();
        if id.is_empty() {
            return Err(invalid("id is required".to_string()));
        }

        let draft = PostingDraft {
            title: self.title,
            company: self.company,
            location: self.location,
            salary: self.salary,
            contract_type,
            level,
            description: self.description,
            requirements: self
                .requirements
                .split(REQUIREMENT_SEPARATOR)
                .map(|entry| entry.trim().to_string())
                .collect(),
            posted_at,
            company_logo: self.company_logo,
            contact_email: self.contact_email,
        };
        validate_draft(&draft).map_err(|source| ImportError::Invalid { row, source })?;

        Ok(Posting::from_draft(PostingId(id.to_string()), draft))
    }
}

/// Read postings from CSV with a header row. Requirements are `|`-separated.
/// Rows are numbered from 1, not counting the header.
pub fn import_postings<R: Read>(reader: R) -> Result<Vec<Posting>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut seen = HashSet::new();
    let mut postings = Vec::new();

    for (index, record) in csv_reader.deserialize::<PostingRow>().enumerate() {
        let row = index + 1;
        let posting = record?.into_posting(row)?;
        if !seen.insert(posting.id.clone()) {
            return Err(ImportError::DuplicateId {
                row,
                id: posting.id,
            });
        }
        postings.push(posting);
    }

    Ok(postings)
}

pub fn import_postings_from_path(path: &Path) -> Result<Vec<Posting>, ImportError> {
    let file = File::open(path)?;
    import_postings(file)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|entry| entry.to_string()).collect()
}

/// Built-in sample catalog used when no seed file is configured.
pub fn default_postings() -> Vec<Posting> {
    vec![
        Posting {
            id: PostingId("1".to_string()),
            title: "Frontend Developer React".to_string(),
            company: "TechFlow Solutions".to_string(),
            location: "Remote - France".to_string(),
            salary: "45-65k €".to_string(),
            contract_type: ContractType::FullTime,
            level: ExperienceLevel::MidLevel,
            description: "Join our distributed team building responsive, high-performance \
                          interfaces for our SaaS products with React 18, TypeScript, and \
                          Redux Toolkit."
                .to_string(),
            requirements: strings(&[
                "At least 3 years of React experience",
                "TypeScript expertise",
                "Experience with REST APIs",
                "Good French and English",
                "Able to work autonomously",
            ]),
            posted_at: date(2024, 3, 10),
            company_logo:
                "https://images.unsplash.com/photo-1549923746-c502d488b3ea?w=100&h=100&fit=crop"
                    .to_string(),
            contact_email: "recrutement@techflow.fr".to_string(),
        },
        Posting {
            id: PostingId("2".to_string()),
            title: "Full-Stack JavaScript Developer".to_string(),
            company: "Digital Nomads Corp".to_string(),
            location: "Remote - Europe".to_string(),
            salary: "55-75k €".to_string(),
            contract_type: ContractType::FullTime,
            level: ExperienceLevel::Senior,
            description: "Design scalable cloud applications and microservice architectures \
                          on Node.js, NestJS, Next.js, and AWS, and mentor the junior \
                          developers on the team."
                .to_string(),
            requirements: strings(&[
                "Strong Node.js and React",
                "AWS experience",
                "Microservice architecture knowledge",
                "Fluent English",
            ]),
            posted_at: date(2024, 3, 12),
            company_logo:
                "https://images.unsplash.com/photo-1552664730-d307ca884978?w=100&h=100&fit=crop"
                    .to_string(),
            contact_email: "jobs@digitalnomads.com".to_string(),
        },
        Posting {
            id: PostingId("3".to_string()),
            title: "Junior Vue.js Developer".to_string(),
            company: "StartupFlow".to_string(),
            location: "Remote - France".to_string(),
            salary: "35-45k €".to_string(),
            contract_type: ContractType::FullTime,
            level: ExperienceLevel::Junior,
            description: "A first role in a fast-moving startup, with mentoring from senior \
                          developers on Vue.js 3, Vite, TailwindCSS, and Vitest."
                .to_string(),
            requirements: strings(&[
                "Knowledge of Vue.js",
                "Solid HTML/CSS foundations",
                "Eager to learn",
                "Knowledge of Git",
            ]),
            posted_at: date(2024, 3, 13),
            company_logo:
                "https://images.unsplash.com/photo-1571171637578-41bc2dd41cd2?w=100&h=100&fit=crop"
                    .to_string(),
            contact_email: "careers@startupflow.io".to_string(),
        },
    ]
}
