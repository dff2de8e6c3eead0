pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::ContactSubmission;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::WidgetConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "site-widgets")]
#[command(about = "IP geolocation lookup and contact form relay, in the terminal")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./site-widgets.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the geolocation provider base URL
    #[arg(long, global = true)]
    pub geo_endpoint: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up an IP address or hostname (your own address when omitted)
    Lookup {
        address: Option<String>,

        /// Print rows as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Send a message through the email relay
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Interactive page: self lookup, then one lookup per line typed on stdin
    Page,
}

#[cfg(feature = "cli")]
impl Command {
    pub fn contact_form(&self) -> Option<ContactSubmission> {
        match self {
            Command::Contact {
                name,
                email,
                subject,
                message,
            } => Some(ContactSubmission {
                name: name.clone(),
                email: email.clone(),
                subject: subject.clone(),
                message: message.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數優先於配置檔
    pub fn apply_overrides(&self, config: &mut WidgetConfig) {
        if let Some(endpoint) = &self.geo_endpoint {
            tracing::info!("🔧 Geolocation endpoint overridden to: {}", endpoint);
            config.geolocation.endpoint = endpoint.clone();
        }
    }
}
