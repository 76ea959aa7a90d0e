//! Field-keyed violation collection shared by posting drafts and job applications.
//!
//! Each form declares a closed enum of its fields; rules record every violation they find
//! instead of stopping at the first one so a caller can highlight all offending inputs at once.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A form field that can carry a violation.
pub trait FieldKey: Copy + Ord + fmt::Debug {
    /// Wire name of the field, as used by the form payloads.
    fn key(self) -> &'static str;
}

/// Ordered mapping from field to its violation message. At most one message per field;
/// recording a field twice keeps the latest message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations<F: FieldKey> {
    entries: BTreeMap<F, String>,
}

impl<F: FieldKey> Default for Violations<F> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<F: FieldKey> Violations<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, field: F, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    pub fn remove(&mut self, field: F) -> Option<String> {
        self.entries.remove(&field)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected violations.
    pub fn into_result(self) -> Result<(), ValidationError<F>> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self))
        }
    }

    fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|(field, message)| format!("{}: {}", field.key(), message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<F: FieldKey> Serialize for Violations<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field.key(), message)?;
        }
        map.end()
    }
}

/// Raised when a form fails validation; carries every violation found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed ({})", .violations.summary())]
pub struct ValidationError<F: FieldKey> {
    violations: Violations<F>,
}

impl<F: FieldKey> ValidationError<F> {
    pub(crate) fn new(violations: Violations<F>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &Violations<F> {
        &self.violations
    }

    pub fn into_violations(self) -> Violations<F> {
        self.violations
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `local@domain.tld`: a single `@`, a dot somewhere after it, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(value)
}

/// Records the usual pair of email violations: missing, then malformed.
pub(crate) fn check_email<F: FieldKey>(violations: &mut Violations<F>, field: F, value: &str) {
    if is_blank(value) {
        violations.record(field, "email is required");
    } else if !is_valid_email(value) {
        violations.record(field, "invalid email address");
    }
}
