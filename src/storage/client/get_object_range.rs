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

use super::Client;
use crate::storage::builders::{GetObjectRange, GetObjectRangeBldr};

impl Client {
    /// Creates a [`GetObjectRange`] request builder for the inclusive byte
    /// range `start..=end` of an object.
    ///
    /// `start = 0, end = 0` sends no `Range` header and reads the whole object.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gtm_storage::storage::Client;
    /// use gtm_storage::storage::types::StorageApi;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("http://127.0.0.1:3000".parse().unwrap(), None).unwrap();
    ///     let resp = client
    ///         .get_object_range("photos", "hello.txt", 0, 4)
    ///         .build()
    ///         .send()
    ///         .await
    ///         .unwrap();
    ///     assert!(resp.is_partial());
    ///     let head = resp.into_content().to_bytes().await.unwrap();
    ///     println!("{}", String::from_utf8_lossy(&head));
    /// }
    /// ```
    pub fn get_object_range<S1: Into<String>, S2: Into<String>>(
        &self,
        bucket: S1,
        object: S2,
        start: u64,
        end: u64,
    ) -> GetObjectRangeBldr {
        GetObjectRange::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
            .start(start)
            .end(end)
    }
}
