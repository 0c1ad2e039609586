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
use crate::storage::error::{DecodeErr, Error};
use crate::storage::header_constants::*;
use crate::storage::response::a_response_traits::{HasBucket, HasObject};
use crate::storage::types::{FromStorageResponse, ObjectMetadata, StorageRequest};
use crate::storage::utils::{from_http_header_value, trim_quotes};
use async_trait::async_trait;
use http::HeaderMap;
use std::mem;

fn header_str<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<Option<&'a str>, DecodeErr> {
    headers
        .get(name)
        .map(|v| v.to_str().map_err(|source| DecodeErr::InvalidHeader { name, source }))
        .transpose()
}

/// Builds object metadata from the headers of a HEAD response.
///
/// A missing `Content-Length` means size 0. A missing or unparseable
/// `Last-Modified` leaves the timestamp unset.
pub(crate) fn metadata_from_headers(key: &str, headers: &HeaderMap) -> Result<ObjectMetadata, DecodeErr> {
    let size = match header_str(headers, CONTENT_LENGTH)? {
        Some(v) => v
            .trim()
            .parse::<u64>()
            .map_err(|source| DecodeErr::InvalidInteger {
                field: CONTENT_LENGTH,
                source,
            })?,
        None => 0,
    };

    let last_modified = headers
        .get(LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| from_http_header_value(v).ok());

    Ok(ObjectMetadata {
        key: key.to_string(),
        name: String::new(),
        content_type: header_str(headers, CONTENT_TYPE)?
            .unwrap_or_default()
            .to_string(),
        last_modified,
        etag: header_str(headers, ETAG)?.map(trim_quotes).unwrap_or_default(),
        size,
    })
}

/// Response of
/// [head_object()](crate::storage::Client::head_object)
/// API
#[derive(Clone, Debug)]
pub struct HeadObjectResponse {
    request: StorageRequest,
    headers: HeaderMap,
    metadata: ObjectMetadata,
}

impl_has_storage_fields!(HeadObjectResponse);

impl HasBucket for HeadObjectResponse {}
impl HasObject for HeadObjectResponse {}

impl HeadObjectResponse {
    pub fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }

    pub fn into_metadata(self) -> ObjectMetadata {
        self.metadata
    }
}

#[async_trait]
impl FromStorageResponse for HeadObjectResponse {
    async fn from_response(
        request: StorageRequest,
        response: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error> {
        let mut resp = response?;
        let headers: HeaderMap = mem::take(resp.headers_mut());
        let metadata = metadata_from_headers(request.object.as_deref().unwrap_or_default(), &headers)?;

        Ok(Self {
            request,
            headers,
            metadata,
        })
    }
}
