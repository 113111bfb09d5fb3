use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use crate::error::HttpError;

/// Default request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A base URL plus optional bearer token, sharing one reqwest client.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl Endpoint {
    /// Build an endpoint with its own client bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend cannot be initialised.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hearthmode/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(HttpError::Build)?;
        Ok(Self::with_client(base_url, token, client))
    }

    /// Build an endpoint reusing an existing client.
    pub fn with_client(base_url: impl Into<String>, token: Option<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            client,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.put(self.url(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send and reject non-success statuses.
    pub(crate) async fn send(request: RequestBuilder) -> Result<reqwest::Response, HttpError> {
        let response = request.send().await?;
        HttpError::check(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_join_paths_without_double_slashes() {
        let endpoint = Endpoint::new("http://thermostat.lan/", None, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(endpoint.base_url(), "http://thermostat.lan");
        assert_eq!(
            endpoint.url("/api/v1/thermostat"),
            "http://thermostat.lan/api/v1/thermostat"
        );
        assert_eq!(endpoint.url(""), "http://thermostat.lan");
    }
}
