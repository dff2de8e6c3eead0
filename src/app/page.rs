use crate::core::contact::{ContactSubmitter, SubmitOutcome};
use crate::core::lookup::LookupController;
use crate::core::{ContactView, EmailRelay, GeoLocation, GeoProvider, LookupView, MapSurface};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Named events the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Page finished loading.
    Ready,
    /// Contact form submit.
    Submit,
    /// Lookup trigger button click, with the input field as it was at click time.
    LookupClick { input: String },
    /// Key pressed in the lookup input field, with the field value at key time.
    LookupKey { key: String, input: String },
}

#[derive(Debug)]
pub enum Handled {
    Lookup(Result<GeoLocation>),
    Submit(SubmitOutcome),
    Ignored,
}

/// The one controller instance per component, built once when the page is ready.
pub struct Page<G, LV, M, R, CV>
where
    G: GeoProvider,
    LV: LookupView,
    M: MapSurface,
    R: EmailRelay,
    CV: ContactView,
{
    lookup: LookupController<G, LV, M>,
    contact: Option<ContactSubmitter<R, CV>>,
}

impl<G, LV, M, R, CV> Page<G, LV, M, R, CV>
where
    G: GeoProvider + 'static,
    LV: LookupView + 'static,
    M: MapSurface + 'static,
    R: EmailRelay + 'static,
    CV: ContactView + 'static,
{
    pub fn new(
        lookup: LookupController<G, LV, M>,
        contact: Option<ContactSubmitter<R, CV>>,
    ) -> Self {
        Self { lookup, contact }
    }

    pub fn lookup(&self) -> &LookupController<G, LV, M> {
        &self.lookup
    }

    pub fn contact(&self) -> Option<&ContactSubmitter<R, CV>> {
        self.contact.as_ref()
    }

    /// Click on the lookup trigger, capturing the input field now.
    pub fn click_event(&self) -> UiEvent {
        UiEvent::LookupClick {
            input: self.lookup.view().input_value(),
        }
    }

    /// Key press in the lookup input, capturing the input field now.
    pub fn key_event(&self, key: &str) -> UiEvent {
        UiEvent::LookupKey {
            key: key.to_string(),
            input: self.lookup.view().input_value(),
        }
    }

    pub async fn dispatch(&self, event: UiEvent) -> Handled {
        tracing::debug!("Dispatching {:?}", event);
        match event {
            UiEvent::Ready => Handled::Lookup(self.lookup.init().await),
            UiEvent::LookupClick { input } => {
                Handled::Lookup(self.lookup.on_trigger_with(&input).await)
            }
            UiEvent::LookupKey { key, input } => {
                match self.lookup.on_key_with(&key, &input).await {
                    Some(result) => Handled::Lookup(result),
                    None => Handled::Ignored,
                }
            }
            UiEvent::Submit => match &self.contact {
                Some(contact) => Handled::Submit(contact.on_submit().await),
                None => {
                    tracing::warn!("Submit ignored: no contact form on this page");
                    Handled::Ignored
                }
            },
        }
    }

    /// 每個事件各自一個任務，重疊的查詢互不等待
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<UiEvent>) {
        let mut handlers = JoinSet::new();

        while let Some(event) = events.recv().await {
            let page = Arc::clone(&self);
            handlers.spawn(async move {
                page.dispatch(event).await;
            });
        }

        while let Some(joined) = handlers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Event handler crashed: {}", e);
            }
        }
        tracing::debug!("Event channel closed, page stopped");
    }
}
