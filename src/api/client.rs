//! Generic JSON fetch client for the PokeAPI
//!
//! Uses async reqwest for non-blocking HTTP requests.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

/// Production PokeAPI endpoint.
pub const POKE_API_BASE: &str = "https://pokeapi.co/api/v2/";

/// Thin JSON client around a shared [`reqwest::Client`].
///
/// Every request carries `Content-Type: application/json`. An optional bearer
/// token can be attached with [`ApiClient::with_auth_token`]; the public
/// PokeAPI is unauthenticated, so the default client sends no Authorization
/// header.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(POKE_API_BASE)
    }

    /// Client against a different endpoint, e.g. a local mirror.
    pub fn with_base_url(base_url: &str) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        Self {
            http: reqwest::Client::new(),
            base_url,
            auth_token: None,
        }
    }

    /// Attach a bearer token to every request.
    ///
    /// The PokeAPI needs none; this exists for mirrors behind an
    /// authenticating proxy.
    pub fn with_auth_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the API base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `url` and decode the JSON body into `T`.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        log::debug!("GET {}", url);
        self.log_curl("GET", url, None);

        let response = self.request(Method::GET, url).send().await?;
        Self::decode(response).await
    }

    /// POST `body` as JSON to `url` and decode the JSON response into `T`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let payload = serde_json::to_string(body)?;
        log::debug!("POST {}", url);
        self.log_curl("POST", url, Some(&payload));

        let response = self.request(Method::POST, url).body(payload).send().await?;
        Self::decode(response).await
    }

    /// Fetch raw bytes, e.g. sprite images.
    pub async fn get_bytes(&self, url: &str) -> ApiResult<Vec<u8>> {
        log::debug!("GET {}", url);

        let response = self.request(Method::GET, url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status));
        }
        Ok(response.bytes().await?.to_vec())
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, url)
            .header("Content-Type", "application/json");
        if let Some(token) = &self.auth_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Log the request as a runnable curl command for easy reproduction.
    fn log_curl(&self, method: &str, url: &str, body: Option<&str>) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        let mut curl = format!("curl -X {} \\\n", method);
        curl.push_str("  -H \"Content-Type: application/json\" \\\n");
        if let Some(token) = &self.auth_token {
            curl.push_str(&format!("  -H \"Authorization: Bearer {}\" \\\n", token));
        }
        if let Some(payload) = body {
            curl.push_str(&format!(
                "  --data-raw '{}' \\\n",
                payload.replace('\n', "")
            ));
        }
        curl.push_str(&format!("  \"{}\"", url));
        log::debug!("{}", curl);
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
