use crate::core::render::{detail_rows, popup_text};
use crate::domain::model::{Coordinates, GeoLocation, MarkerId};
use crate::domain::ports::{GeoProvider, LookupView, MapSurface};
use crate::utils::error::{Result, WidgetError};
use std::sync::{Mutex, MutexGuard};

pub const TRIGGER_IDLE: &str = "Lookup";
pub const TRIGGER_LOADING: &str = "Looking up...";
pub const DEFAULT_ZOOM: u8 = 13;
pub const UNKNOWN_REASON: &str = "Unknown error";

/// Page-wide controller of the IP lookup widget.
///
/// Owns the view, the map surface and the id of the one marker currently on the map.
/// Lookups take `&self`, so overlapping calls are not serialized: each renders when it
/// resolves and the last one to resolve wins. Rendering one outcome (rows, error row,
/// marker) happens under a single lock, so the panel and the map never mix two responses.
pub struct LookupController<G: GeoProvider, V: LookupView, M: MapSurface> {
    provider: G,
    view: V,
    map: M,
    zoom: u8,
    rendered: Mutex<Option<MarkerId>>,
}

impl<G: GeoProvider, V: LookupView, M: MapSurface> LookupController<G, V, M> {
    pub fn new(provider: G, view: V, map: M) -> Self {
        Self {
            provider,
            view,
            map,
            zoom: DEFAULT_ZOOM,
            rendered: Mutex::new(None),
        }
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Self lookup done once when the page is ready.
    pub async fn init(&self) -> Result<GeoLocation> {
        self.lookup(None).await
    }

    /// Trigger button click: look up whatever is in the input field right now.
    pub async fn on_trigger(&self) -> Result<GeoLocation> {
        let input = self.view.input_value();
        self.on_trigger_with(&input).await
    }

    /// Trigger click with the input value read when the click happened.
    pub async fn on_trigger_with(&self, input: &str) -> Result<GeoLocation> {
        self.lookup(Some(input)).await
    }

    /// Key press in the input field. Only Enter starts a lookup.
    pub async fn on_key(&self, key: &str) -> Option<Result<GeoLocation>> {
        let input = self.view.input_value();
        self.on_key_with(key, &input).await
    }

    pub async fn on_key_with(&self, key: &str, input: &str) -> Option<Result<GeoLocation>> {
        if key == "Enter" {
            Some(self.on_trigger_with(input).await)
        } else {
            None
        }
    }

    /// Runs one lookup and renders its outcome.
    ///
    /// A blank or missing address asks for the caller's own location. On failure exactly
    /// one error row is shown and the map is left alone. The trigger is restored
    /// whatever happens.
    pub async fn lookup(&self, address: Option<&str>) -> Result<GeoLocation> {
        let address = address.map(str::trim).filter(|a| !a.is_empty());

        self.view.set_trigger(TRIGGER_LOADING, false);
        tracing::debug!("Looking up {}", address.unwrap_or("own address"));

        let result = self.fetch(address).await;

        match &result {
            Ok(location) => self.render(location),
            Err(e) => {
                tracing::warn!("❌ {} ({:?})", e, e.category());
                let _rendered = self.lock_rendered();
                self.view.show_error(&e.user_friendly_message());
            }
        }

        self.view.set_trigger(TRIGGER_IDLE, true);
        result
    }

    async fn fetch(&self, address: Option<&str>) -> Result<GeoLocation> {
        let location = self.provider.locate(address).await?;

        if location.is_error() {
            let reason = location
                .reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(UNKNOWN_REASON)
                .to_string();
            return Err(WidgetError::LookupFailed { reason });
        }

        Ok(location)
    }

    fn lock_rendered(&self) -> MutexGuard<'_, Option<MarkerId>> {
        match self.rendered.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn render(&self, location: &GeoLocation) {
        let rows = detail_rows(location);
        tracing::info!(
            "✅ Lookup resolved {} ({} fields)",
            location.ip.as_deref().unwrap_or("-"),
            rows.len()
        );

        // 細節列與標記在同一把鎖內更新，地圖上永遠只留一個標記
        let mut marker = self.lock_rendered();
        self.view.show_details(&rows);

        if let Some(at) = location.coordinates() {
            self.place_marker(&mut marker, at, &popup_text(location));
        }
    }

    fn place_marker(&self, marker: &mut Option<MarkerId>, at: Coordinates, popup: &str) {
        self.map.set_view(at, self.zoom);
        if let Some(previous) = marker.take() {
            self.map.remove_marker(previous);
        }
        *marker = Some(self.map.add_marker(at, popup));
    }
}
