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

//! Core storage types and trait definitions

pub mod basic_types;
pub mod storage_request;
pub mod traits;

pub use basic_types::{ListingResult, ObjectMetadata, Operation, UploadOutcome};
pub use storage_request::StorageRequest;
pub use traits::{FromStorageResponse, StorageApi, ToStorageRequest};
