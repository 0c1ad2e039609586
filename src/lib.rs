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

//! # GTM Storage Rust client (`gtm-storage`)
//!
//! A strongly-typed, async client for the GTM Storage HTTP API: bucket
//! creation and removal, object upload, download (whole or ranged), removal,
//! metadata lookup and prefix listing.
//!
//! Each operation has a request builder (e.g. [`storage::builders::PutObject`],
//! [`storage::builders::GetObjectRange`], [`storage::builders::ListObjects`]).
//! Builders implement [`storage::types::StorageApi`], whose async
//! [`send`](crate::storage::types::StorageApi::send) performs exactly one HTTP
//! exchange and returns a typed response or a typed [`storage::error::Error`].
//!
//! ## Basic Usage
//!
//! ```no_run
//! use gtm_storage::storage::Client;
//! use gtm_storage::storage::types::StorageApi;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new("http://127.0.0.1:3000".parse().unwrap(), Some("my-api-key"))
//!         .unwrap();
//!
//!     client.create_bucket("photos").build().send().await.unwrap();
//!
//!     let resp = client
//!         .put_object("photos", "hello.txt", "Hello, World!", "hello.txt")
//!         .build()
//!         .send()
//!         .await
//!         .unwrap();
//!     println!("uploaded '{}' with etag {}", resp.outcome().key, resp.outcome().etag);
//!
//!     let resp = client.get_object("photos", "hello.txt").build().send().await.unwrap();
//!     let content = resp.into_content().to_bytes().await.unwrap();
//!     assert_eq!(content.as_ref(), b"Hello, World!");
//! }
//! ```
//!
//! ## Design
//! - Each API method on [`storage::Client`] returns a builder struct
//! - Builders implement [`storage::types::ToStorageRequest`] for request conversion and
//!   [`storage::types::StorageApi`] for execution
//! - Responses implement [`storage::types::FromStorageResponse`]
//! - Nothing is retried: every error is handed back to the caller

#![allow(clippy::result_large_err)]
pub mod storage;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
