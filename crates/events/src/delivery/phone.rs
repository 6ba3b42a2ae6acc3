//! Phone message delivery via an HTTP text gateway.
//!
//! [`PhoneDelivery`] is the fallback channel when push delivery fails:
//! it posts the notification text to a configurable SMS/WhatsApp
//! gateway. Gateway configuration is loaded from environment variables;
//! if `PHONE_GATEWAY_URL` is not set, [`PhoneConfig::from_env`] returns
//! `None` and no sender should be constructed.

use std::time::Duration;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for phone delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum PhoneError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("Phone gateway returned HTTP {0}")]
    HttpStatus(u16),

    /// No destination number is configured.
    #[error("No phone number configured for fallback delivery")]
    NoRecipient,
}

// ---------------------------------------------------------------------------
// PhoneConfig
// ---------------------------------------------------------------------------

/// Configuration for the phone message gateway.
#[derive(Debug, Clone)]
pub struct PhoneConfig {
    /// Gateway endpoint messages are POSTed to.
    pub gateway_url: String,
    /// Optional API key sent as a bearer token.
    pub api_key: Option<String>,
}

impl PhoneConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `PHONE_GATEWAY_URL` is not set, signalling that
    /// the fallback channel is not configured and should be skipped.
    ///
    /// | Variable            | Required | Default |
    /// |---------------------|----------|---------|
    /// | `PHONE_GATEWAY_URL` | yes      | —       |
    /// | `PHONE_GATEWAY_KEY` | no       | —       |
    pub fn from_env() -> Option<Self> {
        let gateway_url = std::env::var("PHONE_GATEWAY_URL").ok()?;
        Some(Self {
            gateway_url,
            api_key: std::env::var("PHONE_GATEWAY_KEY").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// PhoneDelivery
// ---------------------------------------------------------------------------

/// Sends notification texts through the configured phone gateway.
pub struct PhoneDelivery {
    client: reqwest::Client,
    config: PhoneConfig,
}

impl PhoneDelivery {
    /// Create a new delivery service with the given configuration.
    pub fn new(config: PhoneConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Send a notification text to the given number.
    ///
    /// One attempt only: the phone channel is already the fallback, a
    /// failure here is logged by the caller and the notification is
    /// dropped.
    pub async fn deliver(&self, to_number: &str, message: &str) -> Result<(), PhoneError> {
        if to_number.is_empty() {
            return Err(PhoneError::NoRecipient);
        }

        let mut request = self.client.post(&self.config.gateway_url).json(
            &serde_json::json!({
                "to": to_number,
                "message": message,
            }),
        );
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(PhoneError::HttpStatus(response.status().as_u16()));
        }

        tracing::info!(to = to_number, "Notification text sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
