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
use gtm_storage::storage::response::a_response_traits::HasBucket;
use gtm_storage::storage::response::{CreateBucketResponse, DeleteBucketResponse};
use gtm_storage::storage::types::{Operation, StorageApi};
use gtm_storage_common::test_context::TestContext;
use gtm_storage_common::utils::{rand_bucket_name, rand_object_name};

#[tokio::test]
async fn bucket_create() {
    let ctx = TestContext::new().await;
    let bucket_name = rand_bucket_name();

    let resp: CreateBucketResponse = ctx
        .client
        .create_bucket(&bucket_name)
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(resp.bucket(), bucket_name);
    assert!(ctx.server.has_bucket(&bucket_name));

    let req = ctx.server.last_request().unwrap();
    assert_eq!(req.method, http::Method::POST);
    assert_eq!(req.path, format!("/api/{bucket_name}"));
    assert_eq!(req.body_len, 0);

    // a second create is rejected by the server
    let resp: Result<CreateBucketResponse, Error> =
        ctx.client.create_bucket(&bucket_name).build().send().await;
    match resp {
        Ok(_) => panic!("Bucket already exists, but was created again"),
        Err(Error::Operation(e)) => {
            assert_eq!(e.status_code(), 409);
            assert_eq!(e.operation(), Operation::CreateBucket);
            assert!(e.server_message().contains("already exists"));
        }
        Err(e) => panic!("Unexpected error: {e:?}"),
    }
}

#[tokio::test]
async fn bucket_delete() {
    let ctx = TestContext::new().await;
    let bucket_name = rand_bucket_name();

    // removing a bucket that does not exist
    let resp: Result<DeleteBucketResponse, Error> =
        ctx.client.delete_bucket(&bucket_name).build().send().await;
    match resp {
        Ok(_) => panic!("Bucket does not exist, but was removed"),
        Err(e) => {
            assert_eq!(e.status_code(), Some(404));
            assert_eq!(
                e.as_operation_error().map(|e| e.operation()),
                Some(Operation::DeleteBucket)
            );
        }
    }

    ctx.client
        .create_bucket(&bucket_name)
        .build()
        .send()
        .await
        .unwrap();

    let resp: DeleteBucketResponse = ctx
        .client
        .delete_bucket(&bucket_name)
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(resp.bucket(), bucket_name);
    assert!(!ctx.server.has_bucket(&bucket_name));

    let req = ctx.server.last_request().unwrap();
    assert_eq!(req.method, http::Method::DELETE);
    assert_eq!(req.path, format!("/api/{bucket_name}"));
}

#[tokio::test]
async fn bucket_delete_not_empty() {
    let ctx = TestContext::new().await;
    let (bucket_name, guard) = ctx.create_bucket_helper().await;
    let object_name = rand_object_name();

    ctx.client
        .put_object(&bucket_name, &object_name, "data", "data.bin")
        .build()
        .send()
        .await
        .unwrap();

    let err = ctx
        .client
        .delete_bucket(&bucket_name)
        .build()
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(409));
    assert!(ctx.server.has_bucket(&bucket_name));

    guard.cleanup().await;
    assert!(!ctx.server.has_bucket(&bucket_name));
}

#[tokio::test]
async fn bucket_name_validated_before_sending() {
    let ctx = TestContext::new().await;

    for name in ["", "a/b", "with space", "what?"] {
        let err = ctx.client.create_bucket(name).build().send().await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{name:?}: {err:?}");
    }
    assert!(ctx.server.requests().is_empty());
}
