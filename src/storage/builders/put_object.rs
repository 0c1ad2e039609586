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
use crate::storage::header_constants::CONTENT_TYPE;
use crate::storage::multimap_ext::{Multimap, MultimapExt};
use crate::storage::multipart::encode_file_part;
use crate::storage::response::PutObjectResponse;
use crate::storage::types::{Operation, StorageApi, StorageRequest, ToStorageRequest};
use crate::storage::utils::{check_bucket_name, check_object_name};
use bytes::Bytes;
use http::Method;
use tokio_util::sync::CancellationToken;
use typed_builder::TypedBuilder;

/// Argument builder for the upload operation.
///
/// The payload is sent as the `file` part of a `multipart/form-data` body,
/// under the given file name. It is held in memory in full.
///
/// This struct constructs the parameters required for the [`Client::put_object`](crate::storage::Client::put_object) method.
#[derive(Clone, Debug, TypedBuilder)]
pub struct PutObject {
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
    #[builder(setter(into))]
    content: Bytes,
    #[builder(setter(into))]
    filename: String,
    #[builder(default, setter(strip_option))]
    cancellation_token: Option<CancellationToken>,
}

pub type PutObjectBldr =
    PutObjectBuilder<((Client,), (), (), (String,), (String,), (Bytes,), (String,), ())>;

impl StorageApi for PutObject {
    type StorageResponse = PutObjectResponse;
}

impl ToStorageRequest for PutObject {
    fn to_storage_request(self) -> Result<StorageRequest, ValidationErr> {
        check_bucket_name(&self.bucket)?;
        check_object_name(&self.object)?;

        let multipart = encode_file_part(&self.filename, &self.content)?;

        let mut headers: Multimap = self.extra_headers.unwrap_or_default();
        headers.remove(CONTENT_TYPE);
        headers.add(CONTENT_TYPE, multipart.content_type);

        Ok(StorageRequest::builder()
            .client(self.client)
            .method(Method::PUT)
            .operation(Operation::PutObject)
            .bucket(self.bucket)
            .object(self.object)
            .query_params(self.extra_query_params.unwrap_or_default())
            .headers(headers)
            .body(multipart.body)
            .cancellation_token(self.cancellation_token)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::http::BaseUrl;

    fn client() -> Client {
        let base_url: BaseUrl = "http://localhost:3000".parse().unwrap();
        Client::new(base_url, Some("k")).unwrap()
    }

    #[test]
    fn upload_request_targets_object_url() {
        let req = client()
            .put_object("photos", "2024/a b.jpg", "data", "a b.jpg")
            .build()
            .to_storage_request()
            .unwrap();
        assert_eq!(req.method(), &Method::PUT);
        assert_eq!(
            req.url().to_string(),
            "http://localhost:3000/api/photos/2024/a%20b.jpg"
        );
        let content_type = req.headers.get(CONTENT_TYPE).unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        assert_eq!(req.headers.get_vec(CONTENT_TYPE).map(Vec::len), Some(1));
    }

    #[test]
    fn invalid_names_fail_before_sending() {
        let c = client();
        assert!(c.put_object("", "k", "x", "f").build().to_storage_request().is_err());
        assert!(c.put_object("b", "", "x", "f").build().to_storage_request().is_err());
        assert!(c.put_object("b", "k", "x", "a\nb").build().to_storage_request().is_err());
    }
}
