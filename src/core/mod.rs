pub mod contact;
pub mod lookup;
pub mod render;

pub use crate::domain::model::{
    ContactSubmission, Coordinates, DetailRow, GeoLocation, MarkerId, RelayResponse, StatusKind,
};
pub use crate::domain::ports::{
    ConfigProvider, ContactView, EmailRelay, GeoProvider, LookupView, MapSurface,
};
pub use crate::utils::error::Result;
