use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::domain::{
    Application, ApplicationFields, ResumeFile, ResumeSource, SubmissionPayload, SubmissionState,
};
use super::policy::{FileRejection, ResumePolicy};
use super::validation::{application_violations, ApplicationField, ApplicationViolations};
use crate::catalog::{Posting, PostingId};
use crate::delivery::ApplicationTransport;
use crate::validation::ValidationError;

/// Generic notice shown to the applicant whenever delivery fails.
pub const FAILURE_NOTICE: &str =
    "An error occurred while sending your application. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError<ApplicationField>),
    #[error("an application from this form is already being sent")]
    InFlight,
    #[error("application delivery failed: {reason}")]
    Failed { reason: String },
}

impl SubmitError {
    /// Message suitable for the applicant; delivery details stay in the logs.
    pub fn user_notice(&self) -> String {
        match self {
            SubmitError::Invalid(error) => error.to_string(),
            SubmitError::InFlight => self.to_string(),
            SubmitError::Failed { .. } => FAILURE_NOTICE.to_string(),
        }
    }
}

#[derive(Debug)]
struct FormState {
    fields: ApplicationFields,
    resume: Option<ResumeFile>,
    violations: ApplicationViolations,
    state: SubmissionState,
    transitions: Vec<SubmissionState>,
}

impl FormState {
    fn transition(&mut self, next: SubmissionState) {
        debug!(from = self.state.label(), to = next.label(), "application form transition");
        self.state = next;
        self.transitions.push(next);
    }
}

/// Application form bound to one posting.
///
/// The form can be shared between event handlers: at most one send is in flight at a time and
/// a second `submit` while sending is refused with [`SubmitError::InFlight`]. Entered values and
/// the selected résumé survive a failed delivery so the applicant can retry.
#[derive(Debug)]
pub struct ApplicationForm {
    job_id: PostingId,
    policy: ResumePolicy,
    state: Mutex<FormState>,
}

impl ApplicationForm {
    pub fn new(posting: &Posting) -> Self {
        Self::with_policy(posting, ResumePolicy::default())
    }

    pub fn with_policy(posting: &Posting, policy: ResumePolicy) -> Self {
        Self {
            job_id: posting.id.clone(),
            policy,
            state: Mutex::new(FormState {
                fields: ApplicationFields::default(),
                resume: None,
                violations: ApplicationViolations::new(),
                state: SubmissionState::Idle,
                transitions: vec![SubmissionState::Idle],
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn job_id(&self) -> &PostingId {
        &self.job_id
    }

    pub fn policy(&self) -> &ResumePolicy {
        &self.policy
    }

    pub fn edit(&self, update: impl FnOnce(&mut ApplicationFields)) {
        update(&mut self.lock().fields);
    }

    pub fn fields(&self) -> ApplicationFields {
        self.lock().fields.clone()
    }

    /// Clone of the selected résumé, if any.
    pub fn resume(&self) -> Option<ResumeFile> {
        self.lock().resume.clone()
    }

    /// Run the acceptance policy on a browsed or dropped file. A rejected file is not kept
    /// and its reason is recorded against the résumé field.
    pub fn select_resume(&self, file: ResumeFile, source: ResumeSource) -> Result<(), FileRejection> {
        let mut state = self.lock();
        match self.policy.check(&file.media_type, file.size()) {
            Ok(()) => {
                debug!(?source, file = %file.file_name, size = file.size(), "résumé selected");
                state.violations.remove(ApplicationField::Resume);
                state.resume = Some(file);
                Ok(())
            }
            Err(rejection) => {
                debug!(?source, file = %file.file_name, %rejection, "résumé rejected");
                state
                    .violations
                    .record(ApplicationField::Resume, rejection.to_string());
                Err(rejection)
            }
        }
    }

    pub fn clear_resume(&self) {
        self.lock().resume = None;
    }

    /// Violations from the last selection or submission attempt.
    pub fn violations(&self) -> ApplicationViolations {
        self.lock().violations.clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state
    }

    /// States visited by the current (or most recent) attempt, starting at `Idle`.
    pub fn transitions(&self) -> Vec<SubmissionState> {
        self.lock().transitions.clone()
    }

    pub fn is_submit_enabled(&self) -> bool {
        !self.lock().state.is_busy()
    }

    /// Validate, then hand the payload to `transport`.
    ///
    /// On success the form is cleared and the sent application returned. On any delivery
    /// failure the form goes back to `Idle` with its values untouched.
    pub async fn submit<T>(&self, transport: &T) -> Result<Application, SubmitError>
    where
        T: ApplicationTransport + ?Sized,
    {
        let application = {
            let mut state = self.lock();
            if state.state.is_busy() {
                debug!(job_id = %self.job_id, "duplicate submission suppressed");
                return Err(SubmitError::InFlight);
            }

            state.transitions.clear();
            state.state = SubmissionState::Idle;
            state.transitions.push(SubmissionState::Idle);
            state.transition(SubmissionState::Validating);

            let mut violations =
                application_violations(&state.fields, state.resume.as_ref(), &self.policy);
            if state.resume.is_none() {
                if let Some(rejected) = state.violations.get(ApplicationField::Resume) {
                    violations.record(ApplicationField::Resume, rejected.to_string());
                }
            }

            // A missing résumé is itself a violation, so `Some` here means the form is valid.
            let resume = match state.resume.clone().filter(|_| violations.is_empty()) {
                Some(resume) => resume,
                None => {
                    state.violations = violations.clone();
                    state.transition(SubmissionState::Invalid);
                    state.transition(SubmissionState::Idle);
                    info!(job_id = %self.job_id, fields = violations.len(), "application invalid");
                    return Err(SubmitError::Invalid(ValidationError::new(violations)));
                }
            };

            state.violations.clear();
            state.transition(SubmissionState::Sending);
            Application::from_parts(state.fields.clone(), resume)
        };

        let payload = SubmissionPayload {
            job_id: self.job_id.clone(),
            application: application.clone(),
        };

        let mut sending = SendingGuard {
            form: self,
            armed: true,
        };
        let outcome = transport.submit_application(payload).await;
        sending.armed = false;

        let mut state = self.lock();
        match outcome {
            Ok(ack) if ack.success => {
                state.transition(SubmissionState::Sent);
                state.fields = ApplicationFields::default();
                state.resume = None;
                info!(job_id = %self.job_id, "application sent");
                Ok(application)
            }
            Ok(ack) => {
                let reason = ack
                    .message
                    .unwrap_or_else(|| "delivery declined the application".to_string());
                Err(Self::fail(&mut state, &self.job_id, reason))
            }
            Err(error) => Err(Self::fail(&mut state, &self.job_id, error.to_string())),
        }
    }

    fn fail(state: &mut FormState, job_id: &PostingId, reason: String) -> SubmitError {
        warn!(%job_id, %reason, "application delivery failed");
        state.transition(SubmissionState::Failed);
        state.transition(SubmissionState::Idle);
        SubmitError::Failed { reason }
    }
}

/// Returns the form to `Idle` if the in-flight send is dropped before it completes.
struct SendingGuard<'a> {
    form: &'a ApplicationForm,
    armed: bool,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.form.lock();
        if state.state == SubmissionState::Sending {
            warn!(job_id = %self.form.job_id, "application send abandoned");
            state.transition(SubmissionState::Idle);
        }
    }
}
