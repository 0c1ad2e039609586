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

//! Walks through every client operation against a running server.
//!
//! ```sh
//! GTM_STORAGE_ENDPOINT=http://127.0.0.1:3000 GTM_STORAGE_API_KEY=... \
//!     RUST_LOG=info cargo run --example quickstart
//! ```

use gtm_storage::storage::types::StorageApi;
use gtm_storage::storage::{ClientBuilder, ClientConfig};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init(); // Note: set environment variable RUST_LOG="INFO" to log info and higher

    let config = ClientConfig::from_env()?;
    let client = ClientBuilder::from_config(config)
        .app_info(Some(("quickstart".into(), env!("CARGO_PKG_VERSION").into())))
        .build()?;

    let bucket_name = "quickstart-bucket";
    match client.create_bucket(bucket_name).build().send().await {
        Ok(_) => log::info!("bucket '{bucket_name}' created"),
        Err(e) if e.status_code() == Some(409) => {
            log::info!("bucket '{bucket_name}' already exists")
        }
        Err(e) => return Err(e.into()),
    }

    let resp = client
        .put_object(bucket_name, "test-file", "Hello, GTM Storage!", "test.txt")
        .build()
        .send()
        .await?;
    let outcome = resp.outcome();
    log::info!("uploaded '{}' (etag {})", outcome.key, outcome.etag);
    if let Some(url) = &outcome.preview_url {
        log::info!("preview: {url}");
    }

    let image = Path::new("./demos/example.jpg");
    if image.exists() {
        let resp = client
            .put_object_from_file(bucket_name, "my-image", image)
            .build()
            .send()
            .await?;
        log::info!(
            "image uploaded, thumbnail: {}",
            resp.outcome().thumbnail_url.as_deref().unwrap_or("-")
        );
    }

    let meta = client
        .head_object(bucket_name, "test-file")
        .build()
        .send()
        .await?
        .into_metadata();
    log::info!(
        "'{}': {} bytes, {}, modified {:?}, etag {}",
        meta.key,
        meta.size,
        meta.content_type,
        meta.last_modified,
        meta.etag
    );

    let content = client
        .get_object(bucket_name, "test-file")
        .build()
        .send()
        .await?
        .into_content()
        .to_bytes()
        .await?;
    log::info!("content: {}", String::from_utf8_lossy(&content));

    let listing = client
        .list_objects(bucket_name)
        .prefix("test")
        .build()
        .send()
        .await?;
    for object in listing.objects() {
        log::info!("  - {} ({}, {} bytes)", object.key, object.content_type, object.size);
    }

    let head = client
        .get_object_range(bucket_name, "test-file", 0, 5)
        .build()
        .send()
        .await?
        .into_content()
        .to_bytes()
        .await?;
    log::info!("first 6 bytes: {}", String::from_utf8_lossy(&head));

    log::info!(
        "direct URL: {}",
        client.get_object_url(bucket_name, "test-file")
    );

    let all = client.list_objects(bucket_name).build().send().await?;
    for key in all.listing().keys() {
        client.delete_object(bucket_name, key).build().send().await?;
    }
    client.delete_bucket(bucket_name).build().send().await?;
    log::info!("bucket '{bucket_name}' removed");

    Ok(())
}
