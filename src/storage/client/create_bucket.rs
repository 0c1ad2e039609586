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
use crate::storage::builders::{BucketCommon, CreateBucketBldr};

impl Client {
    /// Creates a [`CreateBucket`](crate::storage::builders::CreateBucket) request builder.
    ///
    /// To execute the request, call [`CreateBucket::send()`](crate::storage::types::StorageApi::send),
    /// which returns a [`Result`] containing a [`CreateBucketResponse`](crate::storage::response::CreateBucketResponse).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gtm_storage::storage::Client;
    /// use gtm_storage::storage::response::CreateBucketResponse;
    /// use gtm_storage::storage::response::a_response_traits::HasBucket;
    /// use gtm_storage::storage::types::StorageApi;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("http://127.0.0.1:3000".parse().unwrap(), Some("key")).unwrap();
    ///     let resp: CreateBucketResponse = client.create_bucket("photos").build().send().await.unwrap();
    ///     println!("created bucket '{}'", resp.bucket());
    /// }
    /// ```
    pub fn create_bucket<S: Into<String>>(&self, bucket: S) -> CreateBucketBldr {
        BucketCommon::builder().client(self.clone()).bucket(bucket)
    }
}
