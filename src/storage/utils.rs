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

//! Various utility and helper functions

use crate::storage::error::{DecodeErr, Error, NetworkError, ValidationErr};
use chrono::{DateTime, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use xmltree::Element;

/// Date and time with UTC timezone
pub type UtcTime = DateTime<Utc>;

const UNRESERVED_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const OBJECT_KEY_ENCODE_SET: &AsciiSet = &UNRESERVED_ENCODE_SET.remove(b'/');

/// Percent-encodes everything except unreserved characters.
pub fn url_encode(s: &str) -> String {
    utf8_percent_encode(s, UNRESERVED_ENCODE_SET).collect()
}

/// Percent-encodes an object key, keeping `/` so nested keys keep their path structure.
pub fn urlencode_object_key(key: &str) -> String {
    utf8_percent_encode(key, OBJECT_KEY_ENCODE_SET).collect()
}

/// Parses an HTTP date (IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`).
pub fn from_http_header_value(s: &str) -> Result<UtcTime, chrono::ParseError> {
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(
        NaiveDateTime::parse_from_str(s.trim(), "%a, %d %b %Y %H:%M:%S GMT")?,
        Utc,
    ))
}

/// Converts time to an HTTP header value.
pub fn to_http_header_value(time: UtcTime) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parses an RFC 3339 timestamp as found in listing documents.
pub fn from_rfc3339(s: &str) -> Result<UtcTime, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(s.trim())?.with_timezone(&Utc))
}

/// Strips surrounding double quotes, as servers quote ETags.
pub fn trim_quotes(s: &str) -> String {
    s.trim_matches('"').to_string()
}

lazy_static! {
    static ref INVALID_BUCKET_CHAR: Regex = Regex::new(r"[/\\?#%\s\p{Cc}]").unwrap();
}

/// Validates given bucket name. The name becomes a single path segment, so
/// anything that would change the URL structure is rejected.
pub fn check_bucket_name(bucket_name: &str) -> Result<(), ValidationErr> {
    let invalid = |reason: &str| ValidationErr::InvalidBucketName {
        name: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.is_empty() {
        return Err(invalid("bucket name cannot be empty"));
    }
    if bucket_name == "." || bucket_name == ".." {
        return Err(invalid("bucket name cannot be a relative path segment"));
    }
    if let Some(m) = INVALID_BUCKET_CHAR.find(bucket_name) {
        return Err(invalid(&format!(
            "bucket name contains invalid character {:?}",
            m.as_str()
        )));
    }
    Ok(())
}

/// Validates given object name.
pub fn check_object_name(object_name: &str) -> Result<(), ValidationErr> {
    if object_name.is_empty() {
        return Err(ValidationErr::InvalidObjectName(
            "object name cannot be empty".into(),
        ));
    }
    if object_name.chars().any(char::is_control) {
        return Err(ValidationErr::InvalidObjectName(format!(
            "object name {object_name:?} contains control characters"
        )));
    }
    // dot segments are resolved during URL parsing and would leave the bucket
    if object_name.split('/').any(|seg| seg == "." || seg == "..") {
        return Err(ValidationErr::InvalidObjectName(format!(
            "object name {object_name:?} contains a '.' or '..' path segment"
        )));
    }
    Ok(())
}

/// Gets text value of given XML element for given tag.
pub fn get_text(element: &Element, tag: &str) -> Result<String, DecodeErr> {
    Ok(element
        .get_child(tag)
        .ok_or(DecodeErr::XmlError(format!("<{tag}> tag not found")))?
        .get_text()
        .unwrap_or_default()
        .to_string())
}

/// Gets optional text value of given XML element for given tag.
pub fn get_text_option(element: &Element, tag: &str) -> Option<String> {
    element
        .get_child(tag)
        .map(|v| v.get_text().unwrap_or_default().to_string())
}

/// Gets text value of given XML element for given tag, or an empty string.
pub fn get_text_default(element: &Element, tag: &str) -> String {
    get_text_option(element, tag).unwrap_or_default()
}

/// Races `fut` against `token`. When the token fires first, `fut` is dropped,
/// which aborts any in-flight HTTP exchange.
pub(crate) async fn with_cancellation<T, F>(
    token: Option<CancellationToken>,
    fut: F,
) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    match token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(NetworkError::Cancelled.into()),
                res = fut => res,
            }
        }
        None => fut.await,
    }
}
