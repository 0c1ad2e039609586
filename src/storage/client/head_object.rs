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
use crate::storage::builders::{HeadObject, HeadObjectBldr};

impl Client {
    /// Creates a [`HeadObject`] request builder to retrieve object metadata without the body.
    ///
    /// To execute the request, call [`HeadObject::send()`](crate::storage::types::StorageApi::send),
    /// which returns a [`Result`] containing a [`HeadObjectResponse`](crate::storage::response::HeadObjectResponse).
    pub fn head_object<S1: Into<String>, S2: Into<String>>(&self, bucket: S1, object: S2) -> HeadObjectBldr {
        HeadObject::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
    }
}
