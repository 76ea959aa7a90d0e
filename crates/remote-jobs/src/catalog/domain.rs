use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog postings. Assigned by the store as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingId(pub String);

impl PostingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of identifiers issued by the store; `None` for foreign identifiers.
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<u64> for PostingId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
}

impl ContractType {
    pub const ALL: [ContractType; 3] = [Self::FullTime, Self::PartTime, Self::Contract];

    pub const fn label(self) -> &'static str {
        match self {
            ContractType::FullTime => "Full-time",
            ContractType::PartTime => "Part-time",
            ContractType::Contract => "Contract",
        }
    }
}

impl FromStr for ContractType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown contract type '{trimmed}'"))
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [Self::Junior, Self::MidLevel, Self::Senior];

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::MidLevel => "Mid-Level",
            ExperienceLevel::Senior => "Senior",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown experience level '{trimmed}'"))
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single job advertisement held by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub id: PostingId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    pub level: ExperienceLevel,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_at: NaiveDate,
    pub company_logo: String,
    pub contact_email: String,
}

impl Posting {
    pub fn from_draft(id: PostingId, draft: PostingDraft) -> Self {
        let PostingDraft {
            title,
            company,
            location,
            salary,
            contract_type,
            level,
            description,
            requirements,
            posted_at,
            company_logo,
            contact_email,
        } = draft;

        Self {
            id,
            title,
            company,
            location,
            salary,
            contract_type,
            level,
            description,
            requirements,
            posted_at,
            company_logo,
            contact_email,
        }
    }
}

/// Posting field values prior to identifier assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    pub level: ExperienceLevel,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_at: NaiveDate,
    pub company_logo: String,
    pub contact_email: String,
}

impl PostingDraft {
    /// Blank draft as presented by the create form: one empty requirement row,
    /// full-time, mid-level.
    pub fn new(posted_at: NaiveDate) -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            salary: String::new(),
            contract_type: ContractType::FullTime,
            level: ExperienceLevel::MidLevel,
            description: String::new(),
            requirements: vec![String::new()],
            posted_at,
            company_logo: String::new(),
            contact_email: String::new(),
        }
    }

    pub fn add_requirement(&mut self) {
        self.requirements.push(String::new());
    }

    /// Returns `false` when `index` is out of range.
    pub fn update_requirement(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.requirements.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// The last remaining requirement row cannot be removed.
    pub fn remove_requirement(&mut self, index: usize) -> Option<String> {
        if self.requirements.len() <= 1 || index >= self.requirements.len() {
            return None;
        }
        Some(self.requirements.remove(index))
    }
}

impl From<&Posting> for PostingDraft {
    fn from(posting: &Posting) -> Self {
        Self {
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            salary: posting.salary.clone(),
            contract_type: posting.contract_type,
            level: posting.level,
            description: posting.description.clone(),
            requirements: posting.requirements.clone(),
            posted_at: posting.posted_at,
            company_logo: posting.company_logo.clone(),
            contact_email: posting.contact_email.clone(),
        }
    }
}
