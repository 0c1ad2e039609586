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
use crate::storage::header_constants::PREFIX;
use crate::storage::multimap_ext::{Multimap, MultimapExt};
use crate::storage::response::ListObjectsResponse;
use crate::storage::types::{Operation, StorageApi, StorageRequest, ToStorageRequest};
use crate::storage::utils::check_bucket_name;
use http::Method;
use tokio_util::sync::CancellationToken;
use typed_builder::TypedBuilder;

/// Argument builder for listing the objects of a bucket, optionally limited
/// to keys starting with `prefix`.
///
/// This struct constructs the parameters required for the [`Client::list_objects`](crate::storage::Client::list_objects) method.
#[derive(Clone, Debug, TypedBuilder)]
pub struct ListObjects {
    #[builder(!default)] // force required
    client: Client,
    #[builder(default, setter(into))]
    extra_headers: Option<Multimap>,
    #[builder(default, setter(into))]
    extra_query_params: Option<Multimap>,
    #[builder(setter(into))] // force required + accept Into<String>
    bucket: String,
    #[builder(default, setter(into, strip_option))]
    prefix: Option<String>,
    #[builder(default = false)]
    with_auth: bool,
    #[builder(default, setter(strip_option))]
    cancellation_token: Option<CancellationToken>,
}

pub type ListObjectsBldr = ListObjectsBuilder<((Client,), (), (), (String,), (), (), ())>;

impl StorageApi for ListObjects {
    type StorageResponse = ListObjectsResponse;
}

impl ToStorageRequest for ListObjects {
    fn to_storage_request(self) -> Result<StorageRequest, ValidationErr> {
        check_bucket_name(&self.bucket)?;

        let mut query_params: Multimap = self.extra_query_params.unwrap_or_default();
        if let Some(prefix) = self.prefix.filter(|p| !p.is_empty()) {
            query_params.add(PREFIX, prefix);
        }

        Ok(StorageRequest::builder()
            .client(self.client)
            .method(Method::GET)
            .operation(Operation::ListObjects)
            .bucket(self.bucket)
            .query_params(query_params)
            .headers(self.extra_headers.unwrap_or_default())
            .with_auth(self.with_auth)
            .cancellation_token(self.cancellation_token)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::http::BaseUrl;

    fn client() -> Client {
        let base_url: BaseUrl = "https://storage.example.com/gw/".parse().unwrap();
        Client::new(base_url, Some("k")).unwrap()
    }

    #[test]
    fn prefix_is_percent_encoded() {
        let req = client()
            .list_objects("photos")
            .prefix("2024/summer trip")
            .build()
            .to_storage_request()
            .unwrap();
        assert_eq!(
            req.url().to_string(),
            "https://storage.example.com/gw/api/photos?prefix=2024%2Fsummer%20trip"
        );
    }

    #[test]
    fn empty_prefix_is_omitted() {
        let req = client()
            .list_objects("photos")
            .prefix("")
            .build()
            .to_storage_request()
            .unwrap();
        assert_eq!(req.url().to_string(), "https://storage.example.com/gw/api/photos");

        let req = client()
            .list_objects("photos")
            .build()
            .to_storage_request()
            .unwrap();
        assert!(req.query_params.is_empty());
    }
}
