use std::time::Duration;

use super::common::*;
use crate::applications::{
    ApplicationField, ApplicationForm, FileRejection, ResumeFile, ResumeSource, SubmissionState,
    SubmitError, FAILURE_NOTICE, MAX_RESUME_BYTES,
};
use SubmissionState::{Failed, Idle, Invalid, Sending, Sent, Validating};

#[tokio::test]
async fn successful_submission_walks_the_happy_path() {
    let form = filled_form();
    let transport = RecordingTransport::default();

    let application = form.submit(&transport).await.expect("sent");

    assert_eq!(form.transitions(), vec![Idle, Validating, Sending, Sent]);
    assert_eq!(form.state(), Sent);
    assert_eq!(application.full_name, "Ada Lovelace");

    let received = transport.received.lock().expect("lock");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].job_id, posting().id);
    assert_eq!(received[0].application, application);
}

#[tokio::test]
async fn sent_form_is_cleared() {
    let form = filled_form();
    form.submit(&RecordingTransport::default()).await.expect("sent");

    assert_eq!(form.fields().full_name, "");
    assert!(form.resume().is_none());
    assert!(form.is_submit_enabled());
}

#[tokio::test]
async fn invalid_form_collects_every_violation_and_sends_nothing() {
    let form = ApplicationForm::new(&posting());
    form.edit(|fields| fields.email = "not-an-email".to_string());
    let transport = RecordingTransport::default();

    match form.submit(&transport).await {
        Err(SubmitError::Invalid(error)) => {
            assert_eq!(error.violations().len(), 5);
            assert_eq!(
                error.violations().get(ApplicationField::Email),
                Some("invalid email address")
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    assert_eq!(form.transitions(), vec![Idle, Validating, Invalid, Idle]);
    assert_eq!(form.violations().len(), 5);
    assert!(transport.received.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn timed_out_delivery_keeps_entries_for_retry() {
    let form = filled_form();
    let before = form.fields();

    let error = form
        .submit(&TimingOutTransport)
        .await
        .expect_err("delivery fails");

    assert!(matches!(error, SubmitError::Failed { .. }));
    assert_eq!(error.user_notice(), FAILURE_NOTICE);
    assert_eq!(form.transitions(), vec![Idle, Validating, Sending, Failed, Idle]);
    assert_eq!(form.state(), Idle);
    assert_eq!(form.fields(), before);
    assert_eq!(form.resume().map(|file| file.size()), Some(2048));

    let retry = RecordingTransport::default();
    form.submit(&retry).await.expect("retry succeeds");
    assert_eq!(retry.received.lock().expect("lock").len(), 1);
}

#[tokio::test]
async fn declined_acknowledgement_is_a_failure() {
    let form = filled_form();

    match form.submit(&DecliningTransport).await {
        Err(SubmitError::Failed { reason }) => assert_eq!(reason, "posting closed"),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(form.state(), Idle);
    assert!(form.resume().is_some());
}

#[tokio::test]
async fn second_submit_while_sending_is_refused() {
    let form = filled_form();
    let transport = GatedTransport::default();

    let (first, second, ()) = tokio::join!(form.submit(&transport), form.submit(&transport), async {
        assert_eq!(form.state(), Sending);
        assert!(!form.is_submit_enabled());
        transport.gate.notify_one();
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(SubmitError::InFlight)));
    assert_eq!(form.transitions(), vec![Idle, Validating, Sending, Sent]);
}

#[tokio::test]
async fn abandoned_send_returns_form_to_idle() {
    let form = filled_form();

    let outcome =
        tokio::time::timeout(Duration::from_millis(20), form.submit(&SilentTransport)).await;

    assert!(outcome.is_err());
    assert_eq!(form.state(), Idle);
    assert_eq!(form.transitions(), vec![Idle, Validating, Sending, Idle]);
    assert!(form.resume().is_some());
}

#[test]
fn browse_and_drop_share_the_same_rules() {
    let cases = [
        (pdf(1024), Ok(())),
        (
            ResumeFile::new("photo.png", "image/png", vec![0u8; 16]),
            Err("image/png"),
        ),
        (pdf(MAX_RESUME_BYTES as usize + 1), Err("too large")),
    ];

    for (file, expected) in cases {
        let outcomes: Vec<_> = [ResumeSource::Browse, ResumeSource::Drop]
            .into_iter()
            .map(|source| {
                let form = ApplicationForm::new(&posting());
                let result = form.select_resume(file.clone(), source);
                (result, form.resume().is_some())
            })
            .collect();

        assert_eq!(outcomes[0], outcomes[1]);
        match expected {
            Ok(()) => assert_eq!(outcomes[0], (Ok(()), true)),
            Err(fragment) => {
                let (result, kept) = &outcomes[0];
                let rejection = result.clone().expect_err("rejected");
                assert!(rejection.to_string().contains(fragment), "{rejection}");
                assert!(!kept);
            }
        }
    }
}

#[test]
fn rejected_file_does_not_replace_accepted_one() {
    let form = filled_form();

    let rejection = form
        .select_resume(
            ResumeFile::new("notes.txt", "text/plain", b"hello".to_vec()),
            ResumeSource::Drop,
        )
        .expect_err("rejected");

    assert!(matches!(rejection, FileRejection::UnsupportedMediaType { .. }));
    assert_eq!(form.resume().map(|file| file.file_name), Some("cv.pdf".to_string()));
    assert!(form.violations().contains(ApplicationField::Resume));

    form.select_resume(pdf(10), ResumeSource::Browse).expect("accepted");
    assert!(!form.violations().contains(ApplicationField::Resume));
}

#[tokio::test]
async fn rejection_reason_survives_until_submit() {
    let form = ApplicationForm::new(&posting());
    form.edit(|fields| {
        fields.full_name = "Ada".to_string();
        fields.email = "ada@example.com".to_string();
        fields.phone = "0600000000".to_string();
        fields.cover_letter = "Hello".to_string();
    });
    let _ = form.select_resume(pdf(MAX_RESUME_BYTES as usize + 1), ResumeSource::Drop);

    match form.submit(&RecordingTransport::default()).await {
        Err(SubmitError::Invalid(error)) => {
            let message = error
                .violations()
                .get(ApplicationField::Resume)
                .expect("resume violation");
            assert!(message.contains("too large"), "{message}");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}
