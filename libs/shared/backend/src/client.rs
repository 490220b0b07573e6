use anyhow::{Result, anyhow};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Method, StatusCode,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, warn};

use shared_config::AppConfig;

/// Non-success response from the hospital API.
///
/// Carried inside `anyhow::Error` so callers can downcast and branch on the
/// status (a missing doctor is a 404, not an outage).
#[derive(Debug, Error)]
#[error("Hospital API error ({status}): {body}")]
pub struct ApiStatusError {
    pub status: StatusCode,
    pub body: String,
}

impl ApiStatusError {
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

pub struct HospitalApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HospitalApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.hospital_api_url.clone(),
            api_key: config.hospital_api_key.clone(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if !self.api_key.is_empty() {
            match HeaderValue::from_str(&self.api_key) {
                Ok(value) => {
                    headers.insert("x-api-key", value);
                }
                Err(_) => warn!("HOSPITAL_API_KEY contains invalid header characters, not sending it"),
            }
        }

        if let Some(token) = auth_token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Dropping bearer token with invalid header characters"),
            }
        }

        headers
    }

    /// Issue a GET against the hospital API and decode the JSON body.
    pub async fn get<T>(&self, path: &str, auth_token: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, auth_token).await
    }

    pub async fn request<T>(&self, method: Method, path: &str, auth_token: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.base_url.is_empty() {
            return Err(anyhow!("Hospital API URL is not configured"));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let response = self.client
            .request(method, &url)
            .headers(self.get_headers(auth_token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Hospital API error ({}): {}", status, body);
            return Err(ApiStatusError { status, body }.into());
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}
