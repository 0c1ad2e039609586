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

use crate::cleanup_guard::CleanupGuard;
use crate::mock_server::MockServer;
use crate::utils::rand_bucket_name;
use gtm_storage::storage::Client;
use gtm_storage::storage::http::BaseUrl;
use gtm_storage::storage::types::StorageApi;

pub const TEST_API_KEY: &str = "test-api-key";

/// A running mock storage server and a client pointed at it.
pub struct TestContext {
    pub server: MockServer,
    pub client: Client,
    pub base_url: BaseUrl,
    pub api_key: String,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let server = MockServer::start(Some(TEST_API_KEY)).await.unwrap();
        let base_url: BaseUrl = server.base_url().parse().unwrap();
        log::debug!("SERVER_ENDPOINT={base_url}");

        let client = Client::new(base_url.clone(), Some(TEST_API_KEY)).unwrap();

        Self {
            server,
            client,
            base_url,
            api_key: TEST_API_KEY.to_string(),
        }
    }

    /// A client for the same server without an API key.
    pub fn anonymous_client(&self) -> Client {
        Client::new(self.base_url.clone(), None).unwrap()
    }

    /// Creates a bucket with a random name and a guard that can remove it
    /// together with its objects.
    ///
    /// # Example
    /// ```ignore
    /// let (bucket_name, guard) = ctx.create_bucket_helper().await;
    /// // ...
    /// guard.cleanup().await;
    /// ```
    pub async fn create_bucket_helper(&self) -> (String, CleanupGuard) {
        let bucket_name = rand_bucket_name();
        let _resp = self
            .client
            .create_bucket(&bucket_name)
            .build()
            .send()
            .await
            .unwrap();
        let guard = CleanupGuard::new(self.client.clone(), &bucket_name);
        (bucket_name, guard)
    }
}
