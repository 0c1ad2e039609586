// GTM Storage Rust Client
// Copyright 2025 GTM Storage Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Storage client to perform bucket and object operations.
//!
//! A [`Client`] owns an immutable [`ClientConfig`] behind an [`Arc`] and a
//! pooled [`reqwest::Client`]. Cloning is cheap and clones may be used from
//! any number of tasks at once.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::storage::error::{Error, NetworkError, ValidationErr};
use crate::storage::header_constants::*;
use crate::storage::http::{BaseUrl, Url};
use crate::storage::multimap_ext::Multimap;

mod create_bucket;
mod delete_bucket;
mod delete_object;
mod get_object;
mod get_object_range;
mod get_object_url;
mod head_object;
mod list_objects;
mod put_object;

/// Timeout applied to every request when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the base URL for [`ClientConfig::from_env`].
pub const ENV_ENDPOINT: &str = "GTM_STORAGE_ENDPOINT";
/// Environment variable holding the API key for [`ClientConfig::from_env`].
pub const ENV_API_KEY: &str = "GTM_STORAGE_API_KEY";
/// Environment variable holding the request timeout in seconds for [`ClientConfig::from_env`].
pub const ENV_TIMEOUT_SECS: &str = "GTM_STORAGE_TIMEOUT_SECS";

/// Immutable client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: BaseUrl,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: BaseUrl, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout: if timeout.is_zero() {
                DEFAULT_TIMEOUT
            } else {
                timeout
            },
        }
    }

    /// Reads the configuration from `GTM_STORAGE_ENDPOINT` (required),
    /// `GTM_STORAGE_API_KEY` and `GTM_STORAGE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ValidationErr> {
        let endpoint = std::env::var(ENV_ENDPOINT)
            .map_err(|_| ValidationErr::InvalidConfig(format!("{ENV_ENDPOINT} is not set")))?;
        let base_url: BaseUrl = endpoint.parse()?;
        let api_key = std::env::var(ENV_API_KEY).ok();
        let timeout = match std::env::var(ENV_TIMEOUT_SECS) {
            Ok(v) => Duration::from_secs(v.trim().parse().map_err(|_| {
                ValidationErr::InvalidConfig(format!("{ENV_TIMEOUT_SECS} must be a number of seconds, got '{v}'"))
            })?),
            Err(_) => Duration::ZERO,
        };
        Ok(Self::new(base_url, api_key, timeout))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.to_string())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client Builder manufactures a Client using given parameters.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: BaseUrl,
    api_key: Option<String>,
    timeout: Duration,
    /// Custom transport. When set, the configured timeout is not applied to it.
    http_client: Option<reqwest::Client>,
    /// Set the app info as an Option of (app_name, app_version) pair. This will show up in the client's user-agent.
    app_info: Option<(String, String)>,
}

impl ClientBuilder {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: Duration::ZERO,
            http_client: None,
            app_info: None,
        }
    }

    /// Builder seeded from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(config.base_url)
            .api_key(config.api_key)
            .timeout(config.timeout)
    }

    /// API key sent as `Authorization: Bearer <key>` and `X-API-Key: <key>`.
    /// An empty key is treated as no key.
    pub fn api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Whole-request timeout. Zero selects [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Set the app info as an Option of (app_name, app_version) pair. This will
    /// show up in the client's user-agent.
    pub fn app_info(mut self, app_info: Option<(String, String)>) -> Self {
        self.app_info = app_info;
        self
    }

    /// Build the Client.
    pub fn build(self) -> Result<Client, Error> {
        let config = ClientConfig::new(self.base_url, self.api_key, self.timeout);

        let http_client = match self.http_client {
            Some(c) => c,
            None => {
                let mut builder = reqwest::Client::builder()
                    .no_gzip()
                    .timeout(config.timeout);

                #[cfg(feature = "http2")]
                {
                    builder = builder.http2_adaptive_window(true);
                }

                let mut user_agent = String::from("GTM Storage (")
                    + std::env::consts::OS
                    + "; "
                    + std::env::consts::ARCH
                    + ") gtm-storage-rs/"
                    + env!("CARGO_PKG_VERSION");

                if let Some((app_name, app_version)) = self.app_info {
                    user_agent.push_str(format!(" {app_name}/{app_version}").as_str());
                }
                builder = builder.user_agent(user_agent);

                builder.build().map_err(ValidationErr::HttpClientBuild)?
            }
        };

        Ok(Client {
            http_client,
            shared: Arc::new(config),
        })
    }
}

/// GTM Storage client to perform bucket and object operations.
///
/// If an API key is configured, requests that require authentication carry it
/// in both the `Authorization` and `X-API-Key` headers; else they are sent
/// anonymously.
#[derive(Clone, Debug)]
pub struct Client {
    http_client: reqwest::Client,
    pub(crate) shared: Arc<ClientConfig>,
}

impl Client {
    /// Returns a client with given base URL and the default timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use gtm_storage::storage::Client;
    /// use gtm_storage::storage::http::BaseUrl;
    ///
    /// let base_url: BaseUrl = "http://127.0.0.1:3000/".parse().unwrap();
    /// let client = Client::new(base_url, Some("my-api-key")).unwrap();
    /// assert_eq!(client.base_url().to_string(), "http://127.0.0.1:3000");
    /// ```
    pub fn new(base_url: BaseUrl, api_key: Option<&str>) -> Result<Self, Error> {
        ClientBuilder::new(base_url)
            .api_key(api_key.map(str::to_string))
            .build()
    }

    pub fn builder(base_url: BaseUrl) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.shared
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.shared.base_url
    }

    /// Returns whether this client is configured to use HTTPS.
    pub fn is_secure(&self) -> bool {
        self.shared.base_url.https
    }

    fn add_auth(&self, headers: &mut HeaderMap) -> Result<(), ValidationErr> {
        let Some(key) = self.shared.api_key.as_deref() else {
            return Ok(());
        };

        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|source| {
            ValidationErr::InvalidHeaderValue {
                name: AUTHORIZATION.to_string(),
                source,
            }
        })?;
        bearer.set_sensitive(true);

        let mut api_key =
            HeaderValue::from_str(key).map_err(|source| ValidationErr::InvalidHeaderValue {
                name: X_API_KEY.to_string(),
                source,
            })?;
        api_key.set_sensitive(true);

        headers.insert(http::header::AUTHORIZATION, bearer);
        headers.insert(HeaderName::from_static("x-api-key"), api_key);
        Ok(())
    }

    fn build_headers(&self, headers: &Multimap, with_auth: bool) -> Result<HeaderMap, ValidationErr> {
        let mut header_map = HeaderMap::new();
        for (key, values) in headers.iter_all() {
            let name: HeaderName = key.parse()?;
            for value in values {
                let value = HeaderValue::from_str(value).map_err(|source| {
                    ValidationErr::InvalidHeaderValue {
                        name: key.clone(),
                        source,
                    }
                })?;
                header_map.append(name.clone(), value);
            }
        }
        if with_auth {
            self.add_auth(&mut header_map)?;
        }
        Ok(header_map)
    }

    /// Sends one request. The caller checks the status.
    pub(crate) async fn execute(
        &self,
        method: Method,
        url: &Url,
        headers: &Multimap,
        body: Option<Bytes>,
        with_auth: bool,
    ) -> Result<reqwest::Response, Error> {
        let header_map = self.build_headers(headers, with_auth)?;

        log::debug!("{method} {url}");

        let mut req = self
            .http_client
            .request(method.clone(), url.to_string())
            .headers(header_map);
        if let Some(body) = body {
            req = req.body(body);
        }

        let resp = req.send().await.map_err(NetworkError::Transport)?;
        log::debug!("{method} {url} -> {}", resp.status());
        Ok(resp)
    }
}
