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

use crate::storage::builders::PutObject;
use crate::storage::client::Client;
use crate::storage::error::Error;
use crate::storage::multimap_ext::Multimap;
use crate::storage::object_content::UploadContent;
use crate::storage::response::PutObjectResponse;
use crate::storage::types::ToStorageRequest;
use crate::storage::utils::{check_bucket_name, check_object_name, with_cancellation};
use tokio_util::sync::CancellationToken;
use typed_builder::TypedBuilder;

/// Argument builder for uploads from any [`UploadContent`] source: bytes, a
/// local file or a stream.
///
/// The content is read completely into memory and then sent as a
/// [`PutObject`]. Without an explicit file name, the base name of the source
/// file is used, and failing that the last segment of the object key.
///
/// This struct constructs the parameters required for the
/// [`Client::put_object_content`](crate::storage::Client::put_object_content) and
/// [`Client::put_object_from_file`](crate::storage::Client::put_object_from_file) methods.
#[derive(Debug, TypedBuilder)]
pub struct PutObjectContent {
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
    content: UploadContent,
    #[builder(default, setter(into, strip_option))]
    filename: Option<String>,
    #[builder(default, setter(strip_option))]
    cancellation_token: Option<CancellationToken>,
}

pub type PutObjectContentBldr = PutObjectContentBuilder<(
    (Client,),
    (),
    (),
    (String,),
    (String,),
    (UploadContent,),
    (),
    (),
)>;

impl PutObjectContent {
    fn upload_filename(&self) -> String {
        self.filename
            .clone()
            .or_else(|| self.content.file_name())
            .unwrap_or_else(|| {
                self.object
                    .rsplit('/')
                    .next()
                    .unwrap_or(&self.object)
                    .to_string()
            })
    }

    /// Reads the content and uploads it.
    pub async fn send(self) -> Result<PutObjectResponse, Error> {
        check_bucket_name(&self.bucket)?;
        check_object_name(&self.object)?;

        let filename = self.upload_filename();
        let token = self.cancellation_token.clone();
        let data = with_cancellation(token, self.content.into_bytes()).await?;

        let mut request = PutObject::builder()
            .client(self.client)
            .extra_headers(self.extra_headers)
            .extra_query_params(self.extra_query_params)
            .bucket(self.bucket)
            .object(self.object)
            .content(data)
            .filename(filename)
            .build()
            .to_storage_request()?;
        request.cancellation_token = self.cancellation_token;
        request.dispatch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::http::BaseUrl;
    use std::path::PathBuf;

    fn client() -> Client {
        let base_url: BaseUrl = "http://localhost:3000".parse().unwrap();
        Client::new(base_url, None).unwrap()
    }

    #[test]
    fn file_name_defaults() {
        let c = client();
        let from_file = c
            .put_object_from_file("b", "k", PathBuf::from("/tmp/dir/photo.jpg"))
            .build();
        assert_eq!(from_file.upload_filename(), "photo.jpg");

        let explicit = c
            .put_object_from_file("b", "k", PathBuf::from("/tmp/dir/photo.jpg"))
            .filename("renamed.jpg")
            .build();
        assert_eq!(explicit.upload_filename(), "renamed.jpg");

        let from_bytes = c.put_object_content("b", "2024/05/a.txt", "abc").build();
        assert_eq!(from_bytes.upload_filename(), "a.txt");
    }

    #[tokio::test]
    async fn invalid_bucket_is_rejected_before_reading() {
        let err = client()
            .put_object_from_file("bad/bucket", "k", PathBuf::from("/does/not/exist"))
            .build()
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
