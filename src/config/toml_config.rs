use crate::adapters::http::{RelayAccount, DEFAULT_GEO_ENDPOINT, DEFAULT_RELAY_ENDPOINT};
use crate::core::lookup::DEFAULT_ZOOM;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, WidgetError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "site-widgets.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub email_relay: EmailRelayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    #[serde(default = "default_geo_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRelayConfig {
    #[serde(default = "default_relay_endpoint")]
    pub endpoint: String,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

fn default_geo_endpoint() -> String {
    DEFAULT_GEO_ENDPOINT.to_string()
}

fn default_relay_endpoint() -> String {
    DEFAULT_RELAY_ENDPOINT.to_string()
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_geo_endpoint(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
        }
    }
}

impl Default for EmailRelayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_relay_endpoint(),
            service_id: None,
            template_id: None,
            public_key: None,
        }
    }
}

impl WidgetConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WidgetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WidgetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Explicit path must exist; otherwise `site-widgets.toml` is used when present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// 替換環境變數 (例如 ${EMAILJS_PUBLIC_KEY})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WidgetError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("geolocation.endpoint", &self.geolocation.endpoint)?;
        validate_url("email_relay.endpoint", &self.email_relay.endpoint)?;
        validate_range("map.zoom", self.map.zoom, 1, 19)?;
        Ok(())
    }

    /// Relay ids are only needed to send mail, so they are checked here rather than in
    /// `validate_config`.
    pub fn relay_account(&self) -> Result<RelayAccount> {
        let relay = &self.email_relay;
        Ok(RelayAccount {
            service_id: required_value("email_relay.service_id", &relay.service_id)?,
            template_id: required_value("email_relay.template_id", &relay.template_id)?,
            public_key: required_value("email_relay.public_key", &relay.public_key)?,
        })
    }
}

fn required_value(field: &str, value: &Option<String>) -> Result<String> {
    let value = validate_required_field(field, value)?;
    validate_non_empty_string(field, value)?;
    if value.contains("${") {
        return Err(WidgetError::ConfigValidationError {
            field: field.to_string(),
            message: format!("Unresolved environment variable in '{}'", value),
        });
    }
    Ok(value.clone())
}

impl ConfigProvider for WidgetConfig {
    fn geo_endpoint(&self) -> &str {
        &self.geolocation.endpoint
    }

    fn relay_endpoint(&self) -> &str {
        &self.email_relay.endpoint
    }

    fn map_zoom(&self) -> u8 {
        self.map.zoom
    }
}

impl Validate for WidgetConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
