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

//! Basic data types shared by requests and responses

use crate::storage::utils::UtcTime;
use http::StatusCode;
use std::fmt;

/// Named storage operations. Used to pick the accepted status codes of a
/// response and to label failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateBucket,
    DeleteBucket,
    PutObject,
    GetObject,
    GetObjectRange,
    DeleteObject,
    HeadObject,
    ListObjects,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateBucket => "create bucket",
            Operation::DeleteBucket => "delete bucket",
            Operation::PutObject => "put object",
            Operation::GetObject => "get object",
            Operation::GetObjectRange => "get object range",
            Operation::DeleteObject => "delete object",
            Operation::HeadObject => "head object",
            Operation::ListObjects => "list objects",
        }
    }

    /// Status codes treated as success for this operation.
    pub fn accepted_statuses(&self) -> &'static [StatusCode] {
        match self {
            Operation::GetObjectRange => &[StatusCode::OK, StatusCode::PARTIAL_CONTENT],
            _ => &[StatusCode::OK],
        }
    }

    pub fn accepts(&self, status: StatusCode) -> bool {
        self.accepted_statuses().contains(&status)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of a stored object.
///
/// `name` is only known from listing entries; a head request leaves it empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub key: String,
    pub name: String,
    pub content_type: String,
    pub last_modified: Option<UtcTime>,
    /// ETag without surrounding quotes.
    pub etag: String,
    pub size: u64,
}

/// Result of a successful upload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    pub key: String,
    /// ETag as returned in the response header.
    pub etag: String,
    pub preview_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Decoded listing document. Objects keep the order the server returned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingResult {
    pub bucket: String,
    pub prefix: String,
    pub objects: Vec<ObjectMetadata>,
}

impl ListingResult {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|o| o.key.as_str())
    }
}
