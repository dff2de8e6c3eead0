use crate::domain::model::{ContactSubmission, StatusKind};
use crate::domain::ports::{ContactView, EmailRelay};
use crate::utils::error::{Result, WidgetError};
use crate::utils::validation::{is_email_like, Validate};

pub const STATUS_SENDING: &str = "Sending...";
pub const STATUS_SENT: &str = "Message sent successfully!";
pub const STATUS_FAILED: &str = "Oops! Something went wrong. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
    /// 表單未通過檢查，沒有送出請求
    Rejected,
}

impl Validate for ContactSubmission {
    fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(WidgetError::ValidationError {
                    message: format!("Please fill in the {} field.", field),
                });
            }
        }

        if !is_email_like(&self.email) {
            return Err(WidgetError::ValidationError {
                message: "Please enter a valid email address.".to_string(),
            });
        }

        Ok(())
    }
}

/// Submit handler for the contact form.
pub struct ContactSubmitter<R: EmailRelay, V: ContactView> {
    relay: R,
    view: V,
}

impl<R: EmailRelay, V: ContactView> ContactSubmitter<R, V> {
    pub fn new(relay: R, view: V) -> Self {
        Self { relay, view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Handles one submit event: read, send, report.
    ///
    /// The submit control is disabled only around the relay call and re-enabled exactly
    /// once afterwards. The view never sees the underlying error detail.
    pub async fn on_submit(&self) -> SubmitOutcome {
        let submission = self.view.read_fields();

        if let Err(e) = submission.validate() {
            tracing::debug!("Contact form rejected before sending: {}", e);
            self.view
                .set_status(StatusKind::Error, &e.user_friendly_message());
            return SubmitOutcome::Rejected;
        }

        self.view.set_submit_enabled(false);
        self.view.set_status(StatusKind::Sending, STATUS_SENDING);

        tracing::debug!(
            "Sending contact message from {} <{}>",
            submission.name,
            submission.email
        );
        let result = self.relay.send(&submission).await;

        self.view.set_submit_enabled(true);

        match result {
            Ok(response) if response.is_sent() => {
                tracing::info!("✅ Contact message delivered to relay");
                self.view.reset_form();
                self.view.set_status(StatusKind::Success, STATUS_SENT);
                SubmitOutcome::Sent
            }
            Ok(response) => {
                let e = WidgetError::RelayRejected {
                    status: response.status,
                };
                tracing::warn!("❌ {}", e);
                tracing::debug!("Relay response body: {}", response.text);
                self.view.set_status(StatusKind::Error, STATUS_FAILED);
                SubmitOutcome::Failed
            }
            Err(e) => {
                tracing::warn!("❌ Contact message failed: {} ({:?})", e, e.category());
                self.view.set_status(StatusKind::Error, STATUS_FAILED);
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RelayResponse;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum ViewEvent {
        SubmitEnabled(bool),
        Status(StatusKind, String),
        Reset,
    }

    #[derive(Clone)]
    struct MockView {
        fields: Arc<Mutex<ContactSubmission>>,
        events: Arc<Mutex<Vec<ViewEvent>>>,
    }

    impl MockView {
        fn new(fields: ContactSubmission) -> Self {
            Self {
                fields: Arc::new(Mutex::new(fields)),
                events: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn events(&self) -> Vec<ViewEvent> {
            self.events.lock().unwrap().clone()
        }

        fn fields(&self) -> ContactSubmission {
            self.fields.lock().unwrap().clone()
        }

        fn enable_toggles(&self) -> Vec<bool> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    ViewEvent::SubmitEnabled(enabled) => Some(enabled),
                    _ => None,
                })
                .collect()
        }

        fn last_status(&self) -> Option<(StatusKind, String)> {
            self.events().into_iter().rev().find_map(|e| match e {
                ViewEvent::Status(kind, text) => Some((kind, text)),
                _ => None,
            })
        }
    }

    impl ContactView for MockView {
        fn read_fields(&self) -> ContactSubmission {
            self.fields()
        }

        fn reset_form(&self) {
            *self.fields.lock().unwrap() = ContactSubmission::default();
            self.events.lock().unwrap().push(ViewEvent::Reset);
        }

        fn set_submit_enabled(&self, enabled: bool) {
            self.events
                .lock()
                .unwrap()
                .push(ViewEvent::SubmitEnabled(enabled));
        }

        fn set_status(&self, kind: StatusKind, text: &str) {
            self.events
                .lock()
                .unwrap()
                .push(ViewEvent::Status(kind, text.to_string()));
        }
    }

    enum Reply {
        Status(u16),
        Transport,
    }

    struct MockRelay {
        reply: Reply,
        sent: Arc<Mutex<Vec<ContactSubmission>>>,
    }

    impl MockRelay {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl EmailRelay for MockRelay {
        async fn send(&self, submission: &ContactSubmission) -> Result<RelayResponse> {
            self.sent.lock().unwrap().push(submission.clone());
            match self.reply {
                Reply::Status(status) => Ok(RelayResponse {
                    status,
                    text: "relay says hi".to_string(),
                }),
                Reply::Transport => Err(WidgetError::HttpStatus { status: 502 }),
            }
        }
    }

    fn filled_form() -> ContactSubmission {
        ContactSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Engines".to_string(),
            message: "About the analytical engine...".to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_send_clears_form() {
        let view = MockView::new(filled_form());
        let relay = MockRelay::new(Reply::Status(200));
        let sent = relay.sent.clone();
        let submitter = ContactSubmitter::new(relay, view.clone());

        let outcome = submitter.on_submit().await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        assert_eq!(sent.lock().unwrap().as_slice(), &[filled_form()]);
        assert_eq!(view.fields(), ContactSubmission::default());
        assert_eq!(
            view.last_status(),
            Some((StatusKind::Success, STATUS_SENT.to_string()))
        );
    }

    #[tokio::test]
    async fn test_control_disabled_during_send_and_reenabled_once() {
        for reply in [Reply::Status(200), Reply::Status(500), Reply::Transport] {
            let view = MockView::new(filled_form());
            let submitter = ContactSubmitter::new(MockRelay::new(reply), view.clone());

            submitter.on_submit().await;

            assert_eq!(view.enable_toggles(), vec![false, true]);
            assert_eq!(
                view.events()[1],
                ViewEvent::Status(StatusKind::Sending, STATUS_SENDING.to_string())
            );
        }
    }

    #[tokio::test]
    async fn test_non_200_keeps_fields_and_shows_generic_error() {
        let view = MockView::new(filled_form());
        let submitter = ContactSubmitter::new(MockRelay::new(Reply::Status(400)), view.clone());

        let outcome = submitter.on_submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(view.fields(), filled_form());
        assert!(!view.events().contains(&ViewEvent::Reset));
        assert_eq!(
            view.last_status(),
            Some((StatusKind::Error, STATUS_FAILED.to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_hides_detail() {
        let view = MockView::new(filled_form());
        let submitter = ContactSubmitter::new(MockRelay::new(Reply::Transport), view.clone());

        let outcome = submitter.on_submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(view.fields(), filled_form());
        let (kind, text) = view.last_status().unwrap();
        assert_eq!(kind, StatusKind::Error);
        assert!(!text.contains("502"));
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected_without_sending() {
        let mut form = filled_form();
        form.email = "not-an-address".to_string();
        let view = MockView::new(form);
        let relay = MockRelay::new(Reply::Status(200));
        let sent = relay.sent.clone();
        let submitter = ContactSubmitter::new(relay, view.clone());

        let outcome = submitter.on_submit().await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(sent.lock().unwrap().is_empty());
        assert!(view.enable_toggles().is_empty());
        assert_eq!(
            view.last_status(),
            Some((
                StatusKind::Error,
                "Please enter a valid email address.".to_string()
            ))
        );
    }

    #[test]
    fn test_blank_field_names_the_field() {
        let mut form = filled_form();
        form.subject = "  ".to_string();

        let err = form.validate().unwrap_err();

        assert_eq!(
            err.user_friendly_message(),
            "Please fill in the subject field."
        );
    }
}
