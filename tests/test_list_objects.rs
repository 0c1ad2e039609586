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

use gtm_storage::storage::error::Error;
use gtm_storage::storage::response::ListObjectsResponse;
use gtm_storage::storage::types::StorageApi;
use gtm_storage_common::test_context::TestContext;

async fn upload(ctx: &TestContext, bucket_name: &str, key: &str, data: &'static str) {
    let filename = key.rsplit('/').next().unwrap_or(key).to_string();
    ctx.client
        .put_object(bucket_name, key, data, filename)
        .build()
        .send()
        .await
        .unwrap();
}

#[tokio::test]
async fn list_with_prefix() {
    let ctx = TestContext::new().await;
    let (bucket_name, guard) = ctx.create_bucket_helper().await;

    upload(&ctx, &bucket_name, "photos/a.jpg", "aaaa").await;
    upload(&ctx, &bucket_name, "photos/b.jpg", "bb").await;
    upload(&ctx, &bucket_name, "docs/c.txt", "c").await;

    let resp: ListObjectsResponse = ctx
        .client
        .list_objects(&bucket_name)
        .prefix("photos/")
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(
        ctx.server.last_request().unwrap().query.as_deref(),
        Some("prefix=photos%2F")
    );

    let listing = resp.listing();
    assert_eq!(listing.bucket, bucket_name);
    assert_eq!(listing.prefix, "photos/");
    assert_eq!(
        listing.keys().collect::<Vec<_>>(),
        vec!["photos/a.jpg", "photos/b.jpg"]
    );

    let a = &resp.objects()[0];
    let stored = ctx.server.object(&bucket_name, "photos/a.jpg").unwrap();
    assert_eq!(a.name, "a.jpg");
    assert_eq!(a.size, 4);
    assert_eq!(a.content_type, "image/jpeg");
    assert_eq!(a.etag, stored.etag);
    assert_eq!(
        a.last_modified.map(|t| t.timestamp()),
        Some(stored.last_modified.timestamp())
    );

    guard.cleanup().await;
}

#[tokio::test]
async fn list_without_prefix() {
    let ctx = TestContext::new().await;
    let (bucket_name, guard) = ctx.create_bucket_helper().await;

    upload(&ctx, &bucket_name, "photos/a.jpg", "aaaa").await;
    upload(&ctx, &bucket_name, "docs/c.txt", "c").await;

    let resp = ctx
        .client
        .list_objects(&bucket_name)
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(ctx.server.last_request().unwrap().query, None);
    assert_eq!(resp.objects().len(), 2);

    // an empty prefix is the same as none
    let resp = ctx
        .client
        .list_objects(&bucket_name)
        .prefix("")
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(ctx.server.last_request().unwrap().query, None);
    assert_eq!(resp.into_listing().objects.len(), 2);

    guard.cleanup().await;
}

#[tokio::test]
async fn list_empty_bucket_and_unmatched_prefix() {
    let ctx = TestContext::new().await;
    let (bucket_name, guard) = ctx.create_bucket_helper().await;

    let resp = ctx
        .client
        .list_objects(&bucket_name)
        .build()
        .send()
        .await
        .unwrap();
    assert!(resp.objects().is_empty());

    upload(&ctx, &bucket_name, "docs/c.txt", "c").await;
    let resp = ctx
        .client
        .list_objects(&bucket_name)
        .prefix("photos/")
        .build()
        .send()
        .await
        .unwrap();
    assert!(resp.objects().is_empty());

    guard.cleanup().await;
}

#[tokio::test]
async fn list_missing_bucket() {
    let ctx = TestContext::new().await;

    let err = ctx
        .client
        .list_objects("no-such-bucket")
        .build()
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn list_with_malformed_success_body() {
    let ctx = TestContext::new().await;
    let (bucket_name, guard) = ctx.create_bucket_helper().await;

    for body in [
        "<ListBucketResult><Contents>",
        "<ListBucketResult><Contents><Key>k</Key><Size>big</Size></Contents></ListBucketResult>",
    ] {
        ctx.server.respond_with(http::StatusCode::OK, body);
        let err = ctx
            .client
            .list_objects(&bucket_name)
            .build()
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "{body:?}: {err:?}");
        assert!(err.as_operation_error().is_none());
        assert_eq!(err.status_code(), None);
    }
    ctx.server.clear_failure();

    guard.cleanup().await;
}
