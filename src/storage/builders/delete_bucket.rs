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

use crate::storage::builders::{BucketCommon, BucketCommonBldr};
use crate::storage::error::ValidationErr;
use crate::storage::response::DeleteBucketResponse;
use crate::storage::types::{Operation, StorageApi, StorageRequest, ToStorageRequest};
use crate::storage::utils::check_bucket_name;
use http::Method;

/// Argument builder for the delete bucket operation.
///
/// This struct constructs the parameters required for the [`Client::delete_bucket`](crate::storage::Client::delete_bucket) method.
pub type DeleteBucket = BucketCommon<DeleteBucketPhantomData>;

pub type DeleteBucketBldr = BucketCommonBldr<DeleteBucketPhantomData>;

#[doc(hidden)]
#[derive(Clone, Debug, Default)]
pub struct DeleteBucketPhantomData;

impl StorageApi for DeleteBucket {
    type StorageResponse = DeleteBucketResponse;
}

impl ToStorageRequest for DeleteBucket {
    fn to_storage_request(self) -> Result<StorageRequest, ValidationErr> {
        check_bucket_name(&self.bucket)?;

        Ok(StorageRequest::builder()
            .client(self.client)
            .method(Method::DELETE)
            .operation(Operation::DeleteBucket)
            .bucket(self.bucket)
            .query_params(self.extra_query_params.unwrap_or_default())
            .headers(self.extra_headers.unwrap_or_default())
            .cancellation_token(self.cancellation_token)
            .build())
    }
}
