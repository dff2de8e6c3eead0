use httpmock::prelude::*;
use site_widgets::core::contact::SubmitOutcome;
use site_widgets::core::{ContactSubmission, ContactView};
use site_widgets::{ContactSubmitter, EmailRelayClient, RelayAccount, TerminalContactView};

const SEND_PATH: &str = "/api/v1.0/email/send";

fn account() -> RelayAccount {
    RelayAccount {
        service_id: "service_test".to_string(),
        template_id: "template_test".to_string(),
        public_key: "pk_test".to_string(),
    }
}

fn form() -> ContactSubmission {
    ContactSubmission {
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        subject: "Compilers".to_string(),
        message: "It's easier to ask forgiveness than it is to get permission.".to_string(),
    }
}

#[tokio::test]
async fn test_successful_send_posts_template_params_and_clears_form() {
    let server = MockServer::start();
    let relay_mock = server.mock(|when, then| {
        when.method(POST)
            .path(SEND_PATH)
            .json_body(serde_json::json!({
                "service_id": "service_test",
                "template_id": "template_test",
                "user_id": "pk_test",
                "template_params": {
                    "name": "Grace Hopper",
                    "email": "grace@example.com",
                    "subject": "Compilers",
                    "message": "It's easier to ask forgiveness than it is to get permission."
                }
            }));
        then.status(200).body("OK");
    });

    let relay = EmailRelayClient::new(server.url(SEND_PATH), account()).unwrap();
    let submitter = ContactSubmitter::new(relay, TerminalContactView::new(form()));

    let outcome = submitter.on_submit().await;

    relay_mock.assert();
    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(submitter.view().read_fields(), ContactSubmission::default());
    assert!(submitter.view().submit_enabled());
}

#[tokio::test]
async fn test_rejected_send_keeps_form() {
    let server = MockServer::start();
    let relay_mock = server.mock(|when, then| {
        when.method(POST).path(SEND_PATH);
        then.status(400).body("The Public Key is invalid");
    });

    let relay = EmailRelayClient::new(server.url(SEND_PATH), account()).unwrap();
    let submitter = ContactSubmitter::new(relay, TerminalContactView::new(form()));

    let outcome = submitter.on_submit().await;

    relay_mock.assert();
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(submitter.view().read_fields(), form());
    assert!(submitter.view().submit_enabled());
}

#[tokio::test]
async fn test_unreachable_relay_fails_and_reenables_submit() {
    let relay = EmailRelayClient::new("http://127.0.0.1:9/send", account()).unwrap();
    let submitter = ContactSubmitter::new(relay, TerminalContactView::new(form()));

    let outcome = submitter.on_submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(submitter.view().read_fields(), form());
    assert!(submitter.view().submit_enabled());
}

#[tokio::test]
async fn test_invalid_form_never_reaches_relay() {
    let server = MockServer::start();
    let relay_mock = server.mock(|when, then| {
        when.method(POST).path(SEND_PATH);
        then.status(200).body("OK");
    });

    let mut incomplete = form();
    incomplete.message = String::new();
    let relay = EmailRelayClient::new(server.url(SEND_PATH), account()).unwrap();
    let submitter = ContactSubmitter::new(relay, TerminalContactView::new(incomplete.clone()));

    let outcome = submitter.on_submit().await;

    relay_mock.assert_hits(0);
    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert_eq!(submitter.view().read_fields(), incomplete);
}
