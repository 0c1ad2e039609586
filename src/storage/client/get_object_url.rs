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
use crate::storage::multimap_ext::Multimap;

impl Client {
    /// Direct URL of an object: `{base_url}/api/{bucket}/{object}`.
    ///
    /// Pure string composition. No request is made and the names are not
    /// validated, so the result is only meaningful for valid names.
    pub fn get_object_url(&self, bucket: &str, object: &str) -> String {
        self.shared
            .base_url
            .build_url(bucket, Some(object), &Multimap::new())
            .to_string()
    }
}
