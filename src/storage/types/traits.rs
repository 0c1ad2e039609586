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

//! Core traits for storage request and response handling.

use super::storage_request::StorageRequest;
use crate::storage::error::{Error, ValidationErr};
use async_trait::async_trait;

/// Trait for converting a request builder into a concrete storage HTTP request.
///
/// Validation of bucket names and object keys happens here, so a builder that
/// fails to convert never touches the network.
pub trait ToStorageRequest: Sized {
    /// Consumes this request builder and returns a [`StorageRequest`].
    fn to_storage_request(self) -> Result<StorageRequest, ValidationErr>;
}

/// Trait for converting HTTP responses into strongly typed response objects.
///
/// `response` has already passed the status check of the request's operation;
/// an `Err` carries the transport or status failure through unchanged.
#[async_trait]
pub trait FromStorageResponse: Sized + Send {
    async fn from_response(
        request: StorageRequest,
        response: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error>;
}

/// Common interface of all request builders.
#[async_trait]
pub trait StorageApi: ToStorageRequest {
    type StorageResponse: FromStorageResponse;

    /// Sends the request and returns the corresponding typed response.
    async fn send(self) -> Result<Self::StorageResponse, Error> {
        self.to_storage_request()?.dispatch().await
    }
}
