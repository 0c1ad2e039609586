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
use crate::storage::builders::{ListObjects, ListObjectsBldr};

impl Client {
    /// Creates a [`ListObjects`] request builder. Set
    /// [`prefix`](crate::storage::builders::ListObjectsBuilder::prefix) to only
    /// list keys starting with it.
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
    ///         .list_objects("photos")
    ///         .prefix("2024/")
    ///         .build()
    ///         .send()
    ///         .await
    ///         .unwrap();
    ///     for object in resp.objects() {
    ///         println!("{} ({} bytes)", object.key, object.size);
    ///     }
    /// }
    /// ```
    pub fn list_objects<S: Into<String>>(&self, bucket: S) -> ListObjectsBldr {
        ListObjects::builder().client(self.clone()).bucket(bucket)
    }
}
