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

use gtm_storage::storage::Client;
use gtm_storage::storage::error::Error;
use gtm_storage::storage::types::StorageApi;

/// Removes a test bucket and everything in it.
pub struct CleanupGuard {
    client: Client,
    bucket_name: String,
}

impl CleanupGuard {
    pub fn new<S: Into<String>>(client: Client, bucket_name: S) -> Self {
        Self {
            client,
            bucket_name: bucket_name.into(),
        }
    }

    pub async fn cleanup(&self) {
        cleanup(self.client.clone(), &self.bucket_name).await;
    }
}

async fn purge_bucket(client: &Client, bucket_name: &str) -> Result<(), Error> {
    let listing = client.list_objects(bucket_name).build().send().await?;
    for key in listing.listing().keys() {
        client.delete_object(bucket_name, key).build().send().await?;
    }
    client.delete_bucket(bucket_name).build().send().await?;
    Ok(())
}

pub async fn cleanup(client: Client, bucket_name: &str) {
    tokio::select!(
        _ = tokio::time::sleep(std::time::Duration::from_secs(60)) => {
            eprintln!("Cleanup timeout after 60s while removing bucket {bucket_name}");
        },
        outcome = purge_bucket(&client, bucket_name) => {
            if let Err(e) = outcome {
                eprintln!("Error removing bucket '{bucket_name}':\n{e}");
            }
        }
    );
}
