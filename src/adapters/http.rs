use crate::domain::model::{ContactSubmission, GeoLocation, RelayResponse};
use crate::domain::ports::{ConfigProvider, EmailRelay, GeoProvider};
use crate::utils::error::{Result, WidgetError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

pub const DEFAULT_GEO_ENDPOINT: &str = "https://ipapi.co";
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("site-widgets/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Keyless geolocation API client (`<base>/<address>/json/`).
#[derive(Debug, Clone)]
pub struct GeoApiClient {
    client: Client,
    base: Url,
}

impl GeoApiClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let base = Url::parse(endpoint).map_err(|e| WidgetError::InvalidConfigValueError {
            field: "geolocation.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if base.cannot_be_a_base() {
            return Err(WidgetError::InvalidConfigValueError {
                field: "geolocation.endpoint".to_string(),
                value: endpoint.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client: build_client()?,
            base,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.geo_endpoint())
    }

    /// 地址作為單一路徑段落編碼；沒有地址時查詢呼叫端自己的 IP
    pub fn request_url(&self, address: Option<&str>) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| WidgetError::ConfigError {
                    message: format!("Geolocation endpoint '{}' cannot carry a path", self.base),
                })?;
            segments.pop_if_empty();
            if let Some(address) = address.map(str::trim).filter(|a| !a.is_empty()) {
                segments.push(address);
            }
            segments.push("json").push("");
        }
        Ok(url)
    }
}

#[async_trait]
impl GeoProvider for GeoApiClient {
    async fn locate(&self, address: Option<&str>) -> Result<GeoLocation> {
        let url = self.request_url(address)?;

        tracing::debug!("Making geolocation request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("Geolocation response status: {}", response.status());

        if !response.status().is_success() {
            return Err(WidgetError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let location: GeoLocation = response.json().await?;
        Ok(location)
    }
}

/// Identifies the relay account and the template the message is rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayAccount {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactSubmission,
}

/// Email-relay client (EmailJS REST send endpoint).
#[derive(Debug, Clone)]
pub struct EmailRelayClient {
    client: Client,
    endpoint: String,
    account: RelayAccount,
}

impl EmailRelayClient {
    pub fn new(endpoint: impl Into<String>, account: RelayAccount) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            endpoint: endpoint.into(),
            account,
        })
    }
}

#[async_trait]
impl EmailRelay for EmailRelayClient {
    async fn send(&self, submission: &ContactSubmission) -> Result<RelayResponse> {
        let body = SendRequest {
            service_id: &self.account.service_id,
            template_id: &self.account.template_id,
            user_id: &self.account.public_key,
            template_params: submission,
        };

        tracing::debug!(
            "Posting contact message to relay {} (service {}, template {})",
            self.endpoint,
            self.account.service_id,
            self.account.template_id
        );
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!("Relay response: {} {}", status, text);

        Ok(RelayResponse { status, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_self_lookup() {
        let client = GeoApiClient::new("https://ipapi.co").unwrap();
        assert_eq!(
            client.request_url(None).unwrap().as_str(),
            "https://ipapi.co/json/"
        );
        assert_eq!(
            client.request_url(Some("  ")).unwrap().as_str(),
            "https://ipapi.co/json/"
        );
    }

    #[test]
    fn test_request_url_with_address() {
        let client = GeoApiClient::new("https://ipapi.co/").unwrap();
        assert_eq!(
            client.request_url(Some(" 8.8.8.8 ")).unwrap().as_str(),
            "https://ipapi.co/8.8.8.8/json/"
        );
    }

    #[test]
    fn test_request_url_keeps_base_path_and_encodes_address() {
        let client = GeoApiClient::new("http://127.0.0.1:9000/geo/").unwrap();
        assert_eq!(
            client.request_url(Some("a/b c")).unwrap().as_str(),
            "http://127.0.0.1:9000/geo/a%2Fb%20c/json/"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let err = GeoApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, WidgetError::InvalidConfigValueError { .. }));

        let err = GeoApiClient::new("mailto:someone@example.com").unwrap_err();
        assert!(matches!(err, WidgetError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_send_request_shape() {
        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
        };
        let body = SendRequest {
            service_id: "service_1",
            template_id: "template_1",
            user_id: "pk_1",
            template_params: &submission,
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "service_id": "service_1",
                "template_id": "template_1",
                "user_id": "pk_1",
                "template_params": {
                    "name": "Ada",
                    "email": "ada@example.com",
                    "subject": "Hi",
                    "message": "Hello"
                }
            })
        );
    }
}
