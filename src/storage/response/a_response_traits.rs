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

//! Accessors shared by response types.

use crate::storage::header_constants::ETAG;
use crate::storage::types::StorageRequest;
use crate::storage::utils::trim_quotes;
use http::HeaderMap;

#[macro_export]
/// Implements the `FromStorageResponse` trait for response types made of
/// `request`, `headers` and a fully read `body`.
macro_rules! impl_from_storage_response {
    ($($ty:ty),* $(,)?) => {
        $(
            #[async_trait::async_trait]
            impl $crate::storage::types::FromStorageResponse for $ty {
                async fn from_response(
                    request: $crate::storage::types::StorageRequest,
                    response: Result<reqwest::Response, $crate::storage::error::Error>,
                ) -> Result<Self, $crate::storage::error::Error> {
                    let mut resp: reqwest::Response = response?;
                    Ok(Self {
                        request,
                        headers: std::mem::take(resp.headers_mut()),
                        body: resp.bytes().await?,
                    })
                }
            }
        )*
    };
}

#[macro_export]
/// Implements the `HasStorageFields` trait for the specified types.
macro_rules! impl_has_storage_fields {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::storage::response::a_response_traits::HasStorageFields for $ty {
                #[inline]
                fn request(&self) -> &$crate::storage::types::StorageRequest {
                    &self.request
                }

                #[inline]
                fn headers(&self) -> &http::HeaderMap {
                    &self.headers
                }
            }
        )*
    };
}

pub trait HasStorageFields {
    /// The request that was sent.
    fn request(&self) -> &StorageRequest;
    /// HTTP headers returned by the server.
    fn headers(&self) -> &HeaderMap;
}

/// Returns the name of the bucket.
pub trait HasBucket: HasStorageFields {
    #[inline]
    fn bucket(&self) -> &str {
        &self.request().bucket
    }
}

/// Returns the object key.
pub trait HasObject: HasStorageFields {
    #[inline]
    fn object(&self) -> &str {
        self.request().object.as_deref().unwrap_or_default()
    }
}

/// Returns the value of the `ETag` header with surrounding quotes removed.
pub trait HasEtagFromHeaders: HasStorageFields {
    #[inline]
    fn etag(&self) -> Option<String> {
        self.headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(trim_quotes)
    }
}
