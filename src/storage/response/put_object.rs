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

use crate::impl_has_storage_fields;
use crate::storage::error::Error;
use crate::storage::header_constants::ETAG;
use crate::storage::response::a_response_traits::{HasBucket, HasObject};
use crate::storage::types::{FromStorageResponse, StorageRequest, UploadOutcome};
use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderMap;
use std::mem;

/// Marks the line of an upload response that carries the preview URL.
pub const PREVIEW_LABEL: &str = "预览地址:";
/// Marks the line of an upload response that carries the thumbnail URL.
pub const THUMBNAIL_LABEL: &str = "缩略图地址:";

/// Last whitespace-separated token of `line`, if the line has more than one.
fn trailing_token(line: &str) -> Option<&str> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [_, .., last] => Some(*last),
        _ => None,
    }
}

/// Best-effort scan of a plain-text upload response for the preview and
/// thumbnail links. When several lines carry a label, the last one wins.
pub(crate) fn scan_links(body: &str) -> (Option<String>, Option<String>) {
    let mut preview = None;
    let mut thumbnail = None;
    // the thumbnail link is only reported alongside a preview label
    if !body.contains(PREVIEW_LABEL) {
        return (preview, thumbnail);
    }
    for line in body.lines() {
        if line.contains(PREVIEW_LABEL)
            && let Some(url) = trailing_token(line)
        {
            preview = Some(url.to_string());
        }
        if line.contains(THUMBNAIL_LABEL)
            && let Some(url) = trailing_token(line)
        {
            thumbnail = Some(url.to_string());
        }
    }
    (preview, thumbnail)
}

/// Response of
/// [put_object()](crate::storage::Client::put_object)
/// API
#[derive(Clone, Debug)]
pub struct PutObjectResponse {
    request: StorageRequest,
    headers: HeaderMap,
    body: Bytes,
    outcome: UploadOutcome,
}

impl_has_storage_fields!(PutObjectResponse);

impl HasBucket for PutObjectResponse {}
impl HasObject for PutObjectResponse {}

impl PutObjectResponse {
    pub fn outcome(&self) -> &UploadOutcome {
        &self.outcome
    }

    pub fn into_outcome(self) -> UploadOutcome {
        self.outcome
    }

    /// Raw response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

#[async_trait]
impl FromStorageResponse for PutObjectResponse {
    async fn from_response(
        request: StorageRequest,
        response: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error> {
        let mut resp = response?;
        let headers: HeaderMap = mem::take(resp.headers_mut());
        let body: Bytes = resp.bytes().await?;

        let (preview_url, thumbnail_url) = scan_links(&String::from_utf8_lossy(&body));
        let etag = headers
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let outcome = UploadOutcome {
            key: request.object.clone().unwrap_or_default(),
            etag,
            preview_url,
            thumbnail_url,
        };

        Ok(Self {
            request,
            headers,
            body,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_finds_both_links() {
        let body = "上传成功\n预览地址: http://cdn/photos/a.jpg\n缩略图地址: http://cdn/thumb/a.jpg\n";
        let (preview, thumbnail) = scan_links(body);
        assert_eq!(preview.as_deref(), Some("http://cdn/photos/a.jpg"));
        assert_eq!(thumbnail.as_deref(), Some("http://cdn/thumb/a.jpg"));
    }

    #[test]
    fn scan_without_labels_finds_nothing() {
        assert_eq!(scan_links("ok"), (None, None));
        assert_eq!(scan_links(""), (None, None));
    }

    #[test]
    fn label_without_value_is_ignored() {
        let (preview, thumbnail) = scan_links("预览地址:\n缩略图地址: http://cdn/t.jpg");
        assert_eq!(preview, None);
        assert_eq!(thumbnail.as_deref(), Some("http://cdn/t.jpg"));
    }

    #[test]
    fn thumbnail_without_preview_label_is_ignored() {
        assert_eq!(scan_links("缩略图地址: http://cdn/only-thumb.jpg\r\n"), (None, None));
    }

    #[test]
    fn last_matching_line_wins() {
        let body = "预览地址: http://a\n预览地址: http://b";
        assert_eq!(scan_links(body).0.as_deref(), Some("http://b"));
    }
}
