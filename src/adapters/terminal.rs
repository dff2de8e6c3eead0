use crate::domain::model::{ContactSubmission, Coordinates, DetailRow, MarkerId, StatusKind};
use crate::domain::ports::{ContactView, LookupView, MapSurface};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Contact form filled from command-line values; status goes to stdout.
pub struct TerminalContactView {
    form: Mutex<ContactSubmission>,
    submit_enabled: AtomicBool,
}

impl TerminalContactView {
    pub fn new(form: ContactSubmission) -> Self {
        Self {
            form: Mutex::new(form),
            submit_enabled: AtomicBool::new(true),
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled.load(Ordering::SeqCst)
    }
}

impl ContactView for TerminalContactView {
    fn read_fields(&self) -> ContactSubmission {
        lock(&self.form).clone()
    }

    fn reset_form(&self) {
        *lock(&self.form) = ContactSubmission::default();
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.submit_enabled.store(enabled, Ordering::SeqCst);
        tracing::debug!("Submit control {}", if enabled { "enabled" } else { "disabled" });
    }

    fn set_status(&self, kind: StatusKind, text: &str) {
        let icon = match kind {
            StatusKind::Sending => "⏳",
            StatusKind::Success => "✅",
            StatusKind::Error => "❌",
        };
        tracing::debug!("Status element class: {}", kind.css_class());
        println!("{} {}", icon, text);
    }
}

#[derive(Serialize)]
struct ErrorLine<'a> {
    error: &'a str,
}

/// Lookup widget rendered as lines on stdout.
pub struct TerminalLookupView {
    input: Mutex<String>,
    format: OutputFormat,
}

impl TerminalLookupView {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            input: Mutex::new(String::new()),
            format,
        }
    }

    /// 模擬使用者在輸入框打字
    pub fn type_text(&self, text: &str) {
        *lock(&self.input) = text.to_string();
    }
}

impl LookupView for TerminalLookupView {
    fn input_value(&self) -> String {
        lock(&self.input).clone()
    }

    fn set_trigger(&self, label: &str, enabled: bool) {
        tracing::debug!("Trigger: {} (enabled: {})", label, enabled);
        if !enabled && self.format == OutputFormat::Text {
            println!("🔍 {}", label);
        }
    }

    fn show_details(&self, rows: &[DetailRow]) {
        match self.format {
            OutputFormat::Text => {
                let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
                for row in rows {
                    println!("  {:<width$}  {}", row.label, row.value, width = width);
                }
            }
            OutputFormat::Json => match serde_json::to_string(rows) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("Could not serialize detail rows: {}", e),
            },
        }
    }

    fn show_error(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("❌ {}", message),
            OutputFormat::Json => match serde_json::to_string(&ErrorLine { error: message }) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("Could not serialize error row: {}", e),
            },
        }
    }
}

pub fn osm_link(at: Coordinates, zoom: u8) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}",
        lat = at.lat,
        lon = at.lon,
        zoom = zoom
    )
}

/// Stand-in for the browser map: keeps the marker set and prints an OpenStreetMap link.
pub struct TerminalMap {
    next_id: AtomicU64,
    zoom: AtomicU8,
    markers: Mutex<Vec<(MarkerId, Coordinates)>>,
    quiet: bool,
}

impl TerminalMap {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            zoom: AtomicU8::new(crate::core::lookup::DEFAULT_ZOOM),
            markers: Mutex::new(Vec::new()),
            quiet: format == OutputFormat::Json,
        }
    }

    pub fn markers(&self) -> Vec<(MarkerId, Coordinates)> {
        lock(&self.markers).clone()
    }
}

impl MapSurface for TerminalMap {
    fn set_view(&self, center: Coordinates, zoom: u8) {
        self.zoom.store(zoom, Ordering::SeqCst);
        tracing::debug!("Map view set to {} (zoom {})", center, zoom);
    }

    fn add_marker(&self, at: Coordinates, popup: &str) -> MarkerId {
        let id = MarkerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        lock(&self.markers).push((id, at));

        if !self.quiet {
            let zoom = self.zoom.load(Ordering::SeqCst);
            println!("📍 {} {}", popup, osm_link(at, zoom));
        }
        id
    }

    fn remove_marker(&self, marker: MarkerId) {
        lock(&self.markers).retain(|(id, _)| *id != marker);
    }
}
