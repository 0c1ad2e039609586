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

use crate::storage::client::Client;
use crate::storage::error::ValidationErr;
use crate::storage::multimap_ext::Multimap;
use crate::storage::response::DeleteObjectResponse;
use crate::storage::types::{Operation, StorageApi, StorageRequest, ToStorageRequest};
use crate::storage::utils::{check_bucket_name, check_object_name};
use http::Method;
use tokio_util::sync::CancellationToken;
use typed_builder::TypedBuilder;

/// Argument builder for removing an object.
///
/// This struct constructs the parameters required for the [`Client::delete_object`](crate::storage::Client::delete_object) method.
#[derive(Clone, Debug, TypedBuilder)]
pub struct DeleteObject {
    #[builder(!default)] // force required
    client: Client,
    #[builder(default, setter(into))]
    extra_headers: Option<Multimap>,
    #[builder(default, setter(into))]
    extra_query_params: Option<Multimap>,
    #[builder(setter(into))] // force required + accept Into<String>
    bucket: String,
    #[builder(setter(into))] // force required + accept Into<String>
    object: String,
    #[builder(default, setter(strip_option))]
    cancellation_token: Option<CancellationToken>,
}

pub type DeleteObjectBldr = DeleteObjectBuilder<((Client,), (), (), (String,), (String,), ())>;

impl StorageApi for DeleteObject {
    type StorageResponse = DeleteObjectResponse;
}

impl ToStorageRequest for DeleteObject {
    fn to_storage_request(self) -> Result<StorageRequest, ValidationErr> {
        check_bucket_name(&self.bucket)?;
        check_object_name(&self.object)?;

        Ok(StorageRequest::builder()
            .client(self.client)
            .method(Method::DELETE)
            .operation(Operation::DeleteObject)
            .bucket(self.bucket)
            .object(self.object)
            .query_params(self.extra_query_params.unwrap_or_default())
            .headers(self.extra_headers.unwrap_or_default())
            .cancellation_token(self.cancellation_token)
            .build())
    }
}
