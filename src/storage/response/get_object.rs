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
use crate::storage::header_constants::CONTENT_TYPE;
use crate::storage::object_content::ObjectContent;
use crate::storage::response::a_response_traits::{HasBucket, HasEtagFromHeaders, HasObject};
use crate::storage::types::{FromStorageResponse, StorageRequest};
use async_trait::async_trait;
use http::{HeaderMap, StatusCode};

/// Response of
/// [get_object()](crate::storage::Client::get_object) and
/// [get_object_range()](crate::storage::Client::get_object_range)
/// APIs
///
/// The body is not read up front; it is handed out as an [`ObjectContent`].
#[derive(Debug)]
pub struct GetObjectResponse {
    request: StorageRequest,
    headers: HeaderMap,
    status: StatusCode,
    content: ObjectContent,
}

impl_has_storage_fields!(GetObjectResponse);

impl HasBucket for GetObjectResponse {}
impl HasObject for GetObjectResponse {}
impl HasEtagFromHeaders for GetObjectResponse {}

impl GetObjectResponse {
    /// `200 OK` for a full read, `206 Partial Content` for a served range.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_partial(&self) -> bool {
        self.status == StatusCode::PARTIAL_CONTENT
    }

    /// Value of the `Content-Length` header, if present.
    pub fn content_length(&self) -> Option<u64> {
        self.content.size()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    pub fn content(&mut self) -> &mut ObjectContent {
        &mut self.content
    }

    pub fn into_content(self) -> ObjectContent {
        self.content
    }
}

#[async_trait]
impl FromStorageResponse for GetObjectResponse {
    async fn from_response(
        request: StorageRequest,
        response: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error> {
        let resp = response?;
        let status = resp.status();
        let headers: HeaderMap = resp.headers().clone();
        let content = ObjectContent::new(resp, request.cancellation_token.clone());

        Ok(Self {
            request,
            headers,
            status,
            content,
        })
    }
}
