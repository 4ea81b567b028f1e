//! CrunchBase profile source, consumed through the RapidAPI gateway.
//!
//! # Security Note - Logging
//!
//! The RapidAPI key is protected from being logged through reqwest's request
//! logging by using the `RedactedHeader` wrapper type, which implements
//! `Display` and `Debug` to redact sensitive values. Even if debug logging
//! is accidentally enabled, the `X-RapidAPI-Key` header value will be
//! displayed as `[REDACTED]` instead of the actual key.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use reqwest::header;
use secrecy::{ExposeSecret, SecretBox};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{DossierError, Result};
use crate::types::{CompanyProfile, Suggestion};

use super::{ProfileSource, SourceError};

const CRUNCHBASE_API_URL: &str = "https://crunchbase-crunchbase-v1.p.rapidapi.com";
const ORGANIZATIONS_ENDPOINT: &str = "/odm-organizations";
const API_KEY_HEADER: &str = "X-RapidAPI-Key";

/// Maximum number of autocomplete candidates returned per lookup.
const SUGGESTION_LIMIT: usize = 5;

/// Wrapper for sensitive header values that redacts the value when formatted.
struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    fn as_header_value(&self) -> Result<header::HeaderValue> {
        header::HeaderValue::from_str(&self.value)
            .map_err(|_| DossierError::Auth("API key is not a valid header value".to_string()))
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

// Wire format of the /odm-organizations endpoint.

#[derive(Debug, Deserialize)]
struct OrganizationsEnvelope {
    data: OrganizationsData,
}

#[derive(Debug, Deserialize)]
struct OrganizationsData {
    #[serde(default)]
    items: Vec<OrganizationItem>,
}

#[derive(Debug, Deserialize)]
struct OrganizationItem {
    properties: OrganizationProperties,
}

#[derive(Debug, Deserialize)]
struct OrganizationProperties {
    name: Option<String>,
    city_name: Option<String>,
    country_code: Option<String>,
    stock_symbol: Option<String>,
    short_description: Option<String>,
    profile_image_url: Option<String>,
}

impl OrganizationProperties {
    fn into_profile(self) -> CompanyProfile {
        CompanyProfile {
            name: self.name.unwrap_or_default(),
            city: self.city_name,
            country: self.country_code,
            stock_symbol: self.stock_symbol,
            description: self.short_description.unwrap_or_default(),
            image_url: self.profile_image_url.unwrap_or_default(),
        }
    }

    fn into_suggestion(self) -> Suggestion {
        let name = self.name.unwrap_or_default();
        Suggestion {
            title: name.clone(),
            value: name,
            image_url: self.profile_image_url.unwrap_or_default(),
        }
    }
}

/// CrunchBase profile source.
pub struct CrunchBaseClient {
    client: Client,
    api_key: SecretBox<String>,
    base_url: String,
}

impl CrunchBaseClient {
    /// Create a new CrunchBase client from configuration.
    ///
    /// Configures the HTTP client with 30s connect timeout and 60s total
    /// timeout; expiry surfaces as a `Transport` failure.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.crunchbase_api_key().ok_or_else(|| {
            DossierError::Auth(
                "CrunchBase API key not configured. Set RAPID_API_KEY environment variable or run: dossier config set crunchbase.api_key <key>".to_string()
            )
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: SecretBox::new(Box::new(api_key)),
            base_url: CRUNCHBASE_API_URL.to_string(),
        })
    }

    /// Create a new CrunchBase client with an API key.
    pub fn new(api_key: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: SecretBox::new(Box::new(api_key.to_string())),
            base_url: CRUNCHBASE_API_URL.to_string(),
        }
    }

    /// Fetch all organizations matching `query`, in upstream order.
    async fn fetch_organizations(&self, query: &str) -> std::result::Result<Vec<OrganizationProperties>, SourceError> {
        let auth_header = RedactedHeader::new(self.api_key.expose_secret());
        let header_value = auth_header
            .as_header_value()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let response = self
            .client
            .get(format!("{}{}", self.base_url, ORGANIZATIONS_ENDPOINT))
            .header(API_KEY_HEADER, header_value)
            .query(&[("name", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Transport(format!("HTTP {}", status)));
        }

        let envelope: OrganizationsEnvelope = response.json().await?;
        Ok(envelope
            .data
            .items
            .into_iter()
            .map(|item| item.properties)
            .collect())
    }
}

impl ProfileSource for CrunchBaseClient {
    async fn fetch_profile(&self, query: &str) -> std::result::Result<CompanyProfile, SourceError> {
        let mut organizations = self.fetch_organizations(query).await?;
        if organizations.is_empty() {
            return Err(SourceError::NotFound);
        }
        Ok(organizations.remove(0).into_profile())
    }

    async fn fetch_suggestions(
        &self,
        partial: &str,
    ) -> std::result::Result<Vec<Suggestion>, SourceError> {
        let organizations = self.fetch_organizations(partial).await?;
        Ok(organizations
            .into_iter()
            .take(SUGGESTION_LIMIT)
            .map(OrganizationProperties::into_suggestion)
            .collect())
    }
}
