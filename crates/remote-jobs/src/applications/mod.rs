//! Application form, résumé acceptance policy, and the submission state machine.

pub mod domain;
mod form;
pub mod policy;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationFields, ResumeFile, ResumeSource, SubmissionPayload, SubmissionState,
};
pub use form::{ApplicationForm, SubmitError, FAILURE_NOTICE};
pub use policy::{FileRejection, ResumePolicy, ACCEPTED_RESUME_TYPES, MAX_RESUME_BYTES};
pub use validation::{application_violations, ApplicationField, ApplicationViolations};
