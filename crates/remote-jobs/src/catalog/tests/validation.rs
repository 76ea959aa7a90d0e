use super::common::*;
use crate::catalog::{draft_violations, validate_draft, PostingDraft, PostingField};

#[test]
fn valid_draft_passes() {
    assert!(validate_draft(&valid_draft("Platform Engineer")).is_ok());
}

#[test]
fn blank_form_reports_every_field_at_once() {
    let draft = PostingDraft::new(posted_at());

    let violations = draft_violations(&draft);

    let fields: Vec<_> = violations.fields().collect();
    assert_eq!(
        fields,
        vec![
            PostingField::Title,
            PostingField::Company,
            PostingField::Location,
            PostingField::Salary,
            PostingField::Description,
            PostingField::CompanyLogo,
            PostingField::ContactEmail,
            PostingField::Requirements,
        ]
    );
    assert_eq!(
        violations.get(PostingField::ContactEmail),
        Some("email is required")
    );
}

#[test]
fn missing_title_and_bad_email_are_both_reported() {
    let mut draft = valid_draft("   ");
    draft.contact_email = "hiring at northwind".to_string();

    let error = validate_draft(&draft).expect_err("invalid draft");

    let fields: Vec<_> = error.violations().fields().collect();
    assert_eq!(fields, vec![PostingField::Title, PostingField::ContactEmail]);
    assert_eq!(
        error.violations().get(PostingField::ContactEmail),
        Some("invalid email address")
    );
}

#[test]
fn blank_requirements_collapse_into_one_violation() {
    let mut draft = valid_draft("Platform Engineer");
    draft.requirements = vec!["Rust".to_string(), " ".to_string(), String::new()];

    let violations = draft_violations(&draft);

    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations.get(PostingField::Requirements),
        Some("every requirement must be filled in")
    );
}

#[test]
fn empty_requirement_list_is_rejected() {
    let mut draft = valid_draft("Platform Engineer");
    draft.requirements.clear();
    assert!(draft_violations(&draft).contains(PostingField::Requirements));
}

#[test]
fn violations_serialize_with_form_keys() {
    let mut draft = valid_draft("Platform Engineer");
    draft.company_logo = String::new();
    draft.contact_email = "nope".to_string();

    let json = serde_json::to_value(draft_violations(&draft)).expect("serializes");

    assert_eq!(
        json,
        serde_json::json!({
            "companyLogo": "company logo is required",
            "contactEmail": "invalid email address",
        })
    );
}

#[test]
fn requirement_rows_can_be_edited() {
    let mut draft = PostingDraft::new(posted_at());
    assert_eq!(draft.requirements, vec![String::new()]);
    assert_eq!(draft.remove_requirement(0), None, "last row stays");

    draft.add_requirement();
    assert!(draft.update_requirement(0, "Rust"));
    assert!(draft.update_requirement(1, "Tokio"));
    assert!(!draft.update_requirement(5, "ignored"));
    assert_eq!(draft.remove_requirement(0), Some("Rust".to_string()));
    assert_eq!(draft.requirements, vec!["Tokio".to_string()]);
}
