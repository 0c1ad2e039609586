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

//! Base URL handling and request URL construction

use crate::storage::error::ValidationErr;
use crate::storage::multimap_ext::{Multimap, MultimapExt};
use crate::storage::utils::{url_encode, urlencode_object_key};
use http::Uri;
use std::fmt;
use std::str::FromStr;

/// Path segment every bucket and object URL lives under.
pub const API_PATH: &str = "/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    pub https: bool,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub query: Multimap,
}

impl Url {
    pub fn host_header_value(&self) -> String {
        if self.port > 0 {
            return format!("{}:{}", self.host, self.port);
        }
        self.host.clone()
    }
}

impl Default for Url {
    fn default() -> Self {
        Self {
            https: true,
            host: String::default(),
            port: u16::default(),
            path: String::default(),
            query: Multimap::default(),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.host.is_empty() {
            return Err(fmt::Error);
        }

        if self.https {
            f.write_str("https://")?;
        } else {
            f.write_str("http://")?;
        }
        f.write_str(&self.host_header_value())?;

        if !self.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&self.path)?;

        if !self.query.is_empty() {
            f.write_str("?")?;
            f.write_str(&self.query.to_query_string())?;
        }

        Ok(())
    }
}

/// Base URL of a storage service, e.g. `http://127.0.0.1:3000`.
///
/// Trailing `/` characters are stripped on parse, so joining `/api/...` onto
/// the base never produces a doubled separator. A base URL may carry a path
/// prefix (`https://gateway.example.com/storage`), which is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    pub https: bool,
    host: String,
    port: u16,
    path: String,
}

impl BaseUrl {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path prefix without trailing `/`; empty when the base URL has no path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Builds `{base}/api/{bucket}[/{object}]` with the given query parameters.
    pub fn build_url(&self, bucket: &str, object: Option<&str>, query: &Multimap) -> Url {
        let mut path = String::with_capacity(self.path.len() + API_PATH.len() + bucket.len() + 2);
        path.push_str(&self.path);
        path.push_str(API_PATH);
        path.push('/');
        path.push_str(&url_encode(bucket));
        if let Some(object) = object {
            path.push('/');
            path.push_str(&urlencode_object_key(object));
        }

        Url {
            https: self.https,
            host: self.host.clone(),
            port: self.port,
            path,
            query: query.clone(),
        }
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(if self.https { "https://" } else { "http://" })?;
        f.write_str(&self.host)?;
        if self.port > 0 {
            write!(f, ":{}", self.port)?;
        }
        f.write_str(&self.path)
    }
}

impl FromStr for BaseUrl {
    type Err = ValidationErr;

    /// Parses a base URL. A missing scheme defaults to HTTPS.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ValidationErr::InvalidBaseUrl("base URL cannot be empty".into()));
        }

        let url: Uri = trimmed.parse()?;

        let https = match url.scheme_str() {
            None | Some("https") => true,
            Some("http") => false,
            Some(other) => {
                return Err(ValidationErr::InvalidBaseUrl(format!(
                    "scheme must be http or https, got '{other}'"
                )));
            }
        };

        let host = match url.host() {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => {
                return Err(ValidationErr::InvalidBaseUrl(format!(
                    "missing host in '{trimmed}'"
                )));
            }
        };

        if url.query().is_some() {
            return Err(ValidationErr::InvalidBaseUrl(
                "base URL cannot contain a query string".into(),
            ));
        }

        Ok(BaseUrl {
            https,
            host,
            port: url.port_u16().unwrap_or(0),
            path: url.path().trim_end_matches('/').to_string(),
        })
    }
}
