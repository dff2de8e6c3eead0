use crate::domain::model::{
    ContactSubmission, Coordinates, DetailRow, GeoLocation, MarkerId, RelayResponse, StatusKind,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Outbound call to the third-party email relay.
#[async_trait]
pub trait EmailRelay: Send + Sync {
    async fn send(&self, submission: &ContactSubmission) -> Result<RelayResponse>;
}

/// Outbound call to the geolocation provider. `None` asks for the caller's own address.
///
/// Implementations return the parsed body as-is, error indicator included; a non-OK HTTP
/// status or a transport failure is an `Err`.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    async fn locate(&self, address: Option<&str>) -> Result<GeoLocation>;
}

/// The contact form, its status element and its submit button.
pub trait ContactView: Send + Sync {
    fn read_fields(&self) -> ContactSubmission;
    fn reset_form(&self);
    fn set_submit_enabled(&self, enabled: bool);
    fn set_status(&self, kind: StatusKind, text: &str);
}

/// The lookup input, trigger button, results and details containers.
pub trait LookupView: Send + Sync {
    fn input_value(&self) -> String;
    fn set_trigger(&self, label: &str, enabled: bool);
    fn show_details(&self, rows: &[DetailRow]);
    fn show_error(&self, message: &str);
}

/// The external mapping library bound to the map container.
pub trait MapSurface: Send + Sync {
    fn set_view(&self, center: Coordinates, zoom: u8);
    fn add_marker(&self, at: Coordinates, popup: &str) -> MarkerId;
    fn remove_marker(&self, marker: MarkerId);
}

pub trait ConfigProvider: Send + Sync {
    fn geo_endpoint(&self) -> &str;
    fn relay_endpoint(&self) -> &str;
    fn map_zoom(&self) -> u8;
}
