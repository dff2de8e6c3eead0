pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::http::{EmailRelayClient, GeoApiClient, RelayAccount};
pub use adapters::terminal::{OutputFormat, TerminalContactView, TerminalLookupView, TerminalMap};
pub use app::page::{Handled, Page, UiEvent};
pub use config::toml_config::WidgetConfig;
pub use crate::core::{contact::ContactSubmitter, lookup::LookupController};
pub use utils::error::{Result, WidgetError};
