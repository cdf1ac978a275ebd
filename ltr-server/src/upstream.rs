//! Upstream live-timing client
//!
//! Forwards GET requests to the single allowed timing host and hands back its
//! JSON body untouched. Targets outside the allowed host are refused before
//! any network call is made.

use crate::error::ApiError;
use anyhow::Result;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};

pub struct UpstreamClient {
    allowed_host: String,
    client: reqwest::Client,
}

/// `host` is `allowed` or one of its subdomains
pub fn is_allowed_host(host: &str, allowed: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let allowed = allowed.trim_end_matches('.').to_ascii_lowercase();
    host == allowed || host.ends_with(&format!(".{}", allowed))
}

const MAX_REDIRECTS: usize = 10;

/// Follow redirects only while they stay on the allowed host
fn redirect_policy(allowed_host: String) -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }

        let target = attempt.url();
        let permitted = matches!(target.scheme(), "http" | "https")
            && is_allowed_host(target.host_str().unwrap_or_default(), &allowed_host);
        if permitted {
            attempt.follow()
        } else {
            let message = format!("redirect to disallowed target {}", target);
            warn!("{}", message);
            attempt.error(message)
        }
    })
}

impl UpstreamClient {
    pub fn new(allowed_host: impl Into<String>, timeout: Duration) -> Result<Self> {
        let allowed_host = allowed_host.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(redirect_policy(allowed_host.clone()))
            .build()?;
        Ok(Self {
            allowed_host,
            client,
        })
    }

    pub fn allowed_host(&self) -> &str {
        &self.allowed_host
    }

    /// Parse `raw` and check it targets the allowed host over http(s)
    pub fn validate(&self, raw: &str) -> Result<Url, ApiError> {
        let url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl {
            details: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                details: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let host = url.host_str().unwrap_or_default();
        if !is_allowed_host(host, &self.allowed_host) {
            return Err(ApiError::ForbiddenDomain {
                host: host.to_string(),
            });
        }

        Ok(url)
    }

    /// Fetch `raw` from the upstream and return its JSON body
    pub async fn fetch(&self, raw: &str) -> Result<serde_json::Value, ApiError> {
        let url = self.validate(raw)?;
        debug!(%url, "Forwarding to upstream");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(ApiError::upstream)?;

        response
            .json::<serde_json::Value>()
            .await
            .map_err(ApiError::upstream)
    }
}
