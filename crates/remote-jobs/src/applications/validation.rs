use super::domain::{ApplicationFields, ResumeFile};
use super::policy::ResumePolicy;
use crate::validation::{check_email, is_blank, FieldKey, Violations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApplicationField {
    FullName,
    Email,
    Phone,
    CoverLetter,
    Resume,
}

impl FieldKey for ApplicationField {
    fn key(self) -> &'static str {
        match self {
            ApplicationField::FullName => "fullName",
            ApplicationField::Email => "email",
            ApplicationField::Phone => "phone",
            ApplicationField::CoverLetter => "coverLetter",
            ApplicationField::Resume => "resume",
        }
    }
}

pub type ApplicationViolations = Violations<ApplicationField>;

/// Collect every violation across the text fields and the attached résumé.
pub fn application_violations(
    fields: &ApplicationFields,
    resume: Option<&ResumeFile>,
    policy: &ResumePolicy,
) -> ApplicationViolations {
    let mut violations = Violations::new();

    if is_blank(&fields.full_name) {
        violations.record(ApplicationField::FullName, "name is required");
    }
    check_email(&mut violations, ApplicationField::Email, &fields.email);
    if is_blank(&fields.phone) {
        violations.record(ApplicationField::Phone, "phone number is required");
    }
    if is_blank(&fields.cover_letter) {
        violations.record(ApplicationField::CoverLetter, "cover letter is required");
    }

    match resume {
        None => violations.record(ApplicationField::Resume, "a résumé is required"),
        Some(file) => {
            if let Err(rejection) = policy.check(&file.media_type, file.size()) {
                violations.record(ApplicationField::Resume, rejection.to_string());
            }
        }
    }

    violations
}
