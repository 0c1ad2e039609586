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
use gtm_storage::storage::types::StorageApi;
use gtm_storage_common::test_context::{TEST_API_KEY, TestContext};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn cancel_in_flight_request() {
    let ctx = TestContext::new().await;
    ctx.server.set_delay(Some(Duration::from_secs(10)));

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let err = ctx
        .client
        .create_bucket("slow")
        .cancellation_token(token)
        .build()
        .send()
        .await
        .unwrap_err();
    assert!(err.is_cancelled(), "{err:?}");
    assert!(!err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn pre_cancelled_token_fails_fast() {
    let ctx = TestContext::new().await;

    let token = CancellationToken::new();
    token.cancel();
    let err = ctx
        .client
        .list_objects("any")
        .cancellation_token(token)
        .build()
        .send()
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn cancel_while_reading_body() {
    let ctx = TestContext::new().await;
    let (bucket_name, guard) = ctx.create_bucket_helper().await;
    ctx.client
        .put_object(&bucket_name, "a.txt", "abc", "a.txt")
        .build()
        .send()
        .await
        .unwrap();

    let token = CancellationToken::new();
    let resp = ctx
        .client
        .get_object(&bucket_name, "a.txt")
        .cancellation_token(token.clone())
        .build()
        .send()
        .await
        .unwrap();
    token.cancel();
    let err = resp.into_content().to_bytes().await.unwrap_err();
    assert!(err.is_cancelled());

    guard.cleanup().await;
}

#[tokio::test]
async fn cancel_upload_from_content() {
    let ctx = TestContext::new().await;
    let (bucket_name, guard) = ctx.create_bucket_helper().await;
    let before = ctx.server.requests().len();

    let token = CancellationToken::new();
    token.cancel();
    let err = ctx
        .client
        .put_object_content(&bucket_name, "a.txt", "abc")
        .cancellation_token(token)
        .build()
        .send()
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(ctx.server.requests().len(), before);

    guard.cleanup().await;
}

#[tokio::test]
async fn client_timeout_is_a_transport_error() {
    let ctx = TestContext::new().await;
    let client = Client::builder(ctx.base_url.clone())
        .api_key(Some(TEST_API_KEY.to_string()))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    assert_eq!(client.config().timeout, Duration::from_millis(200));

    ctx.server.set_delay(Some(Duration::from_secs(5)));
    let err = client.create_bucket("slow").build().send().await.unwrap_err();
    assert!(err.is_timeout(), "{err:?}");
    assert!(!err.is_cancelled());
    assert_eq!(err.status_code(), None);
}
