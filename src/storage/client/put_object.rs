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

//! APIs for uploading objects.

use super::Client;
use crate::storage::builders::{PutObject, PutObjectBldr, PutObjectContent, PutObjectContentBldr};
use crate::storage::object_content::UploadContent;
use bytes::Bytes;
use std::path::Path;

impl Client {
    /// Creates a [`PutObject`] request builder uploading `content` under the
    /// key `object`, as a file named `filename`.
    ///
    /// To execute the request, call [`PutObject::send()`](crate::storage::types::StorageApi::send),
    /// which returns a [`Result`] containing a [`PutObjectResponse`](crate::storage::response::PutObjectResponse).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gtm_storage::storage::Client;
    /// use gtm_storage::storage::types::StorageApi;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("http://127.0.0.1:3000".parse().unwrap(), Some("key")).unwrap();
    ///     let resp = client
    ///         .put_object("photos", "hello.txt", "Hello, World!", "hello.txt")
    ///         .build()
    ///         .send()
    ///         .await
    ///         .unwrap();
    ///     if let Some(url) = &resp.outcome().preview_url {
    ///         println!("preview at {url}");
    ///     }
    /// }
    /// ```
    pub fn put_object<S1, S2, B, S3>(
        &self,
        bucket: S1,
        object: S2,
        content: B,
        filename: S3,
    ) -> PutObjectBldr
    where
        S1: Into<String>,
        S2: Into<String>,
        B: Into<Bytes>,
        S3: Into<String>,
    {
        PutObject::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
            .content(content)
            .filename(filename)
    }

    /// Creates a [`PutObjectContent`] request builder for any [`UploadContent`]
    /// source. Call [`PutObjectContent::send()`] to read and upload it.
    pub fn put_object_content<S1, S2, C>(
        &self,
        bucket: S1,
        object: S2,
        content: C,
    ) -> PutObjectContentBldr
    where
        S1: Into<String>,
        S2: Into<String>,
        C: Into<UploadContent>,
    {
        PutObjectContent::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
            .content(content)
    }

    /// Uploads the local file at `path`. The file name sent to the server
    /// defaults to the base name of `path`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gtm_storage::storage::Client;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("http://127.0.0.1:3000".parse().unwrap(), Some("key")).unwrap();
    ///     let resp = client
    ///         .put_object_from_file("photos", "2024/beach.jpg", "/tmp/beach.jpg")
    ///         .build()
    ///         .send()
    ///         .await
    ///         .unwrap();
    ///     println!("etag: {}", resp.outcome().etag);
    /// }
    /// ```
    pub fn put_object_from_file<S1, S2, P>(
        &self,
        bucket: S1,
        object: S2,
        path: P,
    ) -> PutObjectContentBldr
    where
        S1: Into<String>,
        S2: Into<String>,
        P: AsRef<Path>,
    {
        self.put_object_content(bucket, object, UploadContent::from_path(path.as_ref()))
    }
}
