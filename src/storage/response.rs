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

//! Responses for storage API calls

use crate::storage::error::{Error, OperationError};
use crate::storage::types::Operation;

pub mod a_response_traits;
mod create_bucket;
mod delete_bucket;
mod delete_object;
mod get_object;
mod head_object;
mod list_objects;
mod put_object;

pub use create_bucket::CreateBucketResponse;
pub use delete_bucket::DeleteBucketResponse;
pub use delete_object::DeleteObjectResponse;
pub use get_object::GetObjectResponse;
pub use head_object::HeadObjectResponse;
pub use list_objects::ListObjectsResponse;
pub use put_object::{PREVIEW_LABEL, PutObjectResponse, THUMBNAIL_LABEL};

/// Passes `resp` through when its status is accepted by `operation`.
///
/// Otherwise the body is read to the end and returned as the server message
/// of an [`OperationError`]. A body that cannot be read yields an empty message.
pub(crate) async fn check_status(
    operation: Operation,
    resp: reqwest::Response,
) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if operation.accepts(status) {
        return Ok(resp);
    }

    let server_message = match resp.bytes().await {
        Ok(body) => String::from_utf8_lossy(&body).into_owned(),
        Err(e) => {
            log::warn!("{operation}: could not read error body: {e}");
            String::new()
        }
    };
    log::warn!("{operation} rejected with status {status}: {server_message}");

    Err(OperationError::new(status.as_u16(), server_message, operation).into())
}
