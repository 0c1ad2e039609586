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

use crate::storage::response::a_response_traits::HasBucket;
use crate::storage::types::StorageRequest;
use crate::{impl_from_storage_response, impl_has_storage_fields};
use bytes::Bytes;
use http::HeaderMap;

/// Response of
/// [create_bucket()](crate::storage::Client::create_bucket)
/// API
#[derive(Clone, Debug)]
pub struct CreateBucketResponse {
    request: StorageRequest,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_storage_response!(CreateBucketResponse);
impl_has_storage_fields!(CreateBucketResponse);

impl HasBucket for CreateBucketResponse {}

impl CreateBucketResponse {
    /// Raw response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}
