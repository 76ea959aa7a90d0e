use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::domain::{Posting, PostingDraft, PostingId};
use super::filter::{self, FilterCriteria};
use super::validation::{validate_draft, PostingField};
use crate::validation::ValidationError;

/// Ordered, in-memory system of record for postings.
///
/// Identifiers come from a counter that starts one past the current size (or past the highest
/// numeric identifier already present) and only moves forward, so a posting created after the
/// seed gets `count + 1` for as long as nothing is removed.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    postings: Vec<Posting>,
    next_sequence: u64,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            postings: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Seed the store. Later postings reusing an identifier are dropped.
    pub fn with_postings(postings: Vec<Posting>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(postings.len());
        for posting in postings {
            if seen.insert(posting.id.clone()) {
                kept.push(posting);
            } else {
                warn!(id = %posting.id, "dropping posting with duplicate identifier");
            }
        }

        let next_sequence = next_sequence(&kept);
        Self {
            postings: kept,
            next_sequence,
        }
    }

    /// Current postings in insertion order.
    pub fn list(&self) -> &[Posting] {
        &self.postings
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn get(&self, id: &PostingId) -> Option<&Posting> {
        self.postings.iter().find(|posting| &posting.id == id)
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Posting> {
        filter::filter(&self.postings, criteria)
    }

    /// Validate `draft`, then append it under a fresh identifier.
    pub fn create(&mut self, draft: PostingDraft) -> Result<Posting, ValidationError<PostingField>> {
        validate_draft(&draft)?;

        let id = PostingId::from(self.next_sequence);
        self.next_sequence += 1;

        let posting = Posting::from_draft(id, draft);
        self.postings.push(posting.clone());
        info!(id = %posting.id, title = %posting.title, "posting created");
        Ok(posting)
    }

    /// Replace the posting sharing `posting.id`.
    ///
    /// An unknown identifier is not an error: the store is left untouched and the input is
    /// handed back unchanged. Callers must make sure the identifier exists.
    pub fn update(&mut self, posting: Posting) -> Result<Posting, ValidationError<PostingField>> {
        validate_draft(&PostingDraft::from(&posting))?;

        match self.postings.iter_mut().find(|entry| entry.id == posting.id) {
            Some(entry) => {
                *entry = posting.clone();
                info!(id = %posting.id, "posting updated");
            }
            None => debug!(id = %posting.id, "update ignored: no posting with this identifier"),
        }
        Ok(posting)
    }

    /// Undo the most recent `create`, returning its identifier to the counter.
    pub(crate) fn retract_created(&mut self, id: &PostingId) -> Option<Posting> {
        let is_last = self.postings.last().map(|posting| &posting.id) == Some(id);
        if !is_last {
            return None;
        }
        let posting = self.postings.pop()?;
        if posting.id.sequence() == Some(self.next_sequence - 1) {
            self.next_sequence -= 1;
        }
        Some(posting)
    }

    /// Re-key a posting under the identifier the delivery boundary assigned to it.
    /// Returns `false` when `remote` already belongs to another posting.
    pub(crate) fn adopt_identifier(&mut self, local: &PostingId, remote: PostingId) -> bool {
        if &remote == local {
            return true;
        }
        if self.get(&remote).is_some() {
            return false;
        }
        let Some(entry) = self.postings.iter_mut().find(|entry| &entry.id == local) else {
            return false;
        };
        if let Some(sequence) = remote.sequence() {
            self.next_sequence = self.next_sequence.max(sequence + 1);
        }
        entry.id = remote;
        true
    }

    /// Put back the version of a posting that existed before an `update`.
    pub(crate) fn restore(&mut self, previous: Posting) {
        if let Some(entry) = self.postings.iter_mut().find(|entry| entry.id == previous.id) {
            *entry = previous;
        }
    }
}

/// One past the larger of the catalog size and the highest numeric identifier.
pub(crate) fn next_sequence(postings: &[Posting]) -> u64 {
    let highest = postings
        .iter()
        .filter_map(|posting| posting.id.sequence())
        .max()
        .unwrap_or(0);
    highest.max(postings.len() as u64) + 1
}
