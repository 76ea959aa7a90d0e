//! Posting catalog: data model, draft validation, filters, and the store itself.

pub mod domain;
pub mod filter;
pub mod import;
pub(crate) mod store;
pub mod synced;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{ContractType, ExperienceLevel, Posting, PostingDraft, PostingId};
pub use filter::{matches, FilterCriteria};
pub use import::{default_postings, import_postings, import_postings_from_path, ImportError};
pub use store::CatalogStore;
pub use synced::{CatalogError, SyncedCatalog};
pub use validation::{draft_violations, validate_draft, PostingField, PostingViolations};
