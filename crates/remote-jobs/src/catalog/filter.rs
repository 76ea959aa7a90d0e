use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{ContractType, ExperienceLevel, Posting};

/// Active filter selection. Empty sets mean "all"; the search text is matched
/// case-insensitively against title, company, and description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub types: BTreeSet<ContractType>,
    #[serde(default)]
    pub levels: BTreeSet<ExperienceLevel>,
    #[serde(default)]
    pub search: String,
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_type(mut self, contract_type: ContractType) -> Self {
        self.types.insert(contract_type);
        self
    }

    pub fn with_level(mut self, level: ExperienceLevel) -> Self {
        self.levels.insert(level);
        self
    }

    /// Checkbox semantics: selects the type if absent, deselects it otherwise.
    pub fn toggle_type(&mut self, contract_type: ContractType) {
        if !self.types.remove(&contract_type) {
            self.types.insert(contract_type);
        }
    }

    pub fn toggle_level(&mut self, level: ExperienceLevel) {
        if !self.levels.remove(&level) {
            self.levels.insert(level);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.levels.is_empty() && self.search.trim().is_empty()
    }
}

pub fn matches(posting: &Posting, criteria: &FilterCriteria) -> bool {
    if !criteria.types.is_empty() && !criteria.types.contains(&posting.contract_type) {
        return false;
    }
    if !criteria.levels.is_empty() && !criteria.levels.contains(&posting.level) {
        return false;
    }
    if criteria.search.trim().is_empty() {
        return true;
    }

    let needle = criteria.search.to_lowercase();
    [&posting.title, &posting.company, &posting.description]
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Visible subset of `postings`, in catalog order.
pub fn filter<'a>(postings: &'a [Posting], criteria: &FilterCriteria) -> Vec<&'a Posting> {
    postings
        .iter()
        .filter(|posting| matches(posting, criteria))
        .collect()
}
