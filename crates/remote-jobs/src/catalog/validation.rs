use super::domain::PostingDraft;
use crate::validation::{check_email, is_blank, FieldKey, ValidationError, Violations};

/// Fields of the posting form that can carry a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PostingField {
    Title,
    Company,
    Location,
    Salary,
    Description,
    CompanyLogo,
    ContactEmail,
    Requirements,
}

impl FieldKey for PostingField {
    fn key(self) -> &'static str {
        match self {
            PostingField::Title => "title",
            PostingField::Company => "company",
            PostingField::Location => "location",
            PostingField::Salary => "salary",
            PostingField::Description => "description",
            PostingField::CompanyLogo => "companyLogo",
            PostingField::ContactEmail => "contactEmail",
            PostingField::Requirements => "requirements",
        }
    }
}

pub type PostingViolations = Violations<PostingField>;

/// Collect every violation in `draft`.
pub fn draft_violations(draft: &PostingDraft) -> PostingViolations {
    let mut violations = Violations::new();

    let required = [
        (PostingField::Title, &draft.title, "title is required"),
        (PostingField::Company, &draft.company, "company name is required"),
        (PostingField::Location, &draft.location, "location is required"),
        (PostingField::Salary, &draft.salary, "salary is required"),
        (
            PostingField::Description,
            &draft.description,
            "description is required",
        ),
        (
            PostingField::CompanyLogo,
            &draft.company_logo,
            "company logo is required",
        ),
    ];
    for (field, value, message) in required {
        if is_blank(value) {
            violations.record(field, message);
        }
    }

    check_email(
        &mut violations,
        PostingField::ContactEmail,
        &draft.contact_email,
    );

    if draft.requirements.is_empty() {
        violations.record(PostingField::Requirements, "at least one requirement is needed");
    } else if draft.requirements.iter().any(|entry| is_blank(entry)) {
        violations.record(PostingField::Requirements, "every requirement must be filled in");
    }

    violations
}

/// Gate applied before any catalog mutation.
pub fn validate_draft(draft: &PostingDraft) -> Result<(), ValidationError<PostingField>> {
    draft_violations(draft).into_result()
}
