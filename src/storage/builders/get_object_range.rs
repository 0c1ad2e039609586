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
use crate::storage::header_constants::RANGE;
use crate::storage::multimap_ext::{Multimap, MultimapExt};
use crate::storage::response::GetObjectResponse;
use crate::storage::types::{Operation, StorageApi, StorageRequest, ToStorageRequest};
use crate::storage::utils::{check_bucket_name, check_object_name};
use http::Method;
use tokio_util::sync::CancellationToken;
use typed_builder::TypedBuilder;

/// Value of the `Range` header for an inclusive byte range.
///
/// `start = 0, end = 0` produces no header at all, which makes it a full read
/// rather than a read of the first byte.
pub fn range_header_value(start: u64, end: u64) -> Option<String> {
    if start > 0 || end > 0 {
        Some(format!("bytes={start}-{end}"))
    } else {
        None
    }
}

/// Argument builder for downloading the inclusive byte range `start..=end` of an object.
///
/// The server answers `206 Partial Content` for a served range and `200 OK`
/// for a full read; both are accepted.
///
/// This struct constructs the parameters required for the [`Client::get_object_range`](crate::storage::Client::get_object_range) method.
#[derive(Clone, Debug, TypedBuilder)]
pub struct GetObjectRange {
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
    #[builder(!default)]
    start: u64,
    #[builder(!default)]
    end: u64,
    #[builder(default = false)]
    with_auth: bool,
    #[builder(default, setter(strip_option))]
    cancellation_token: Option<CancellationToken>,
}

pub type GetObjectRangeBldr =
    GetObjectRangeBuilder<((Client,), (), (), (String,), (String,), (u64,), (u64,), (), ())>;

impl StorageApi for GetObjectRange {
    type StorageResponse = GetObjectResponse;
}

impl ToStorageRequest for GetObjectRange {
    fn to_storage_request(self) -> Result<StorageRequest, ValidationErr> {
        check_bucket_name(&self.bucket)?;
        check_object_name(&self.object)?;

        let mut headers: Multimap = self.extra_headers.unwrap_or_default();
        if let Some(range) = range_header_value(self.start, self.end) {
            headers.remove(RANGE);
            headers.add(RANGE, range);
        }

        Ok(StorageRequest::builder()
            .client(self.client)
            .method(Method::GET)
            .operation(Operation::GetObjectRange)
            .bucket(self.bucket)
            .object(self.object)
            .query_params(self.extra_query_params.unwrap_or_default())
            .headers(headers)
            .with_auth(self.with_auth)
            .cancellation_token(self.cancellation_token)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::http::BaseUrl;

    #[test]
    fn range_header() {
        assert_eq!(range_header_value(0, 0), None);
        assert_eq!(range_header_value(0, 99).as_deref(), Some("bytes=0-99"));
        assert_eq!(range_header_value(10, 20).as_deref(), Some("bytes=10-20"));
        assert_eq!(range_header_value(5, 0).as_deref(), Some("bytes=5-0"));
    }

    #[test]
    fn zero_range_sends_no_header() {
        let base_url: BaseUrl = "http://localhost:3000".parse().unwrap();
        let client = Client::new(base_url, None).unwrap();

        let req = client
            .get_object_range("b", "k", 0, 0)
            .build()
            .to_storage_request()
            .unwrap();
        assert!(req.headers.get(RANGE).is_none());
        assert!(!req.with_auth);

        let req = client
            .get_object_range("b", "k", 2, 4)
            .build()
            .to_storage_request()
            .unwrap();
        assert_eq!(req.headers.get(RANGE).map(String::as_str), Some("bytes=2-4"));
    }

    quickcheck! {
        fn prop_range_header_iff_nonzero(start: u64, end: u64) -> bool {
            range_header_value(start, end).is_some() == (start > 0 || end > 0)
        }
    }
}
