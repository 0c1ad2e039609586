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

use crate::storage::client::Client;
use crate::storage::multimap_ext::Multimap;
use std::marker::PhantomData;
use tokio_util::sync::CancellationToken;
use typed_builder::TypedBuilder;

/// Common parameters for bucket operations.
#[derive(Clone, Debug, TypedBuilder)]
pub struct BucketCommon<T> {
    #[builder(!default)] // force required
    pub(crate) client: Client,

    #[builder(default, setter(into))]
    pub(crate) extra_headers: Option<Multimap>,
    #[builder(default, setter(into))]
    pub(crate) extra_query_params: Option<Multimap>,
    #[builder(setter(into))] // force required + accept Into<String>
    pub(crate) bucket: String,
    #[builder(default, setter(strip_option))]
    pub(crate) cancellation_token: Option<CancellationToken>,

    #[builder(default)]
    _operation: PhantomData<T>,
}

/// Builder type for [`BucketCommon`] with the client and bucket already set.
pub type BucketCommonBldr<T> = BucketCommonBuilder<T, ((Client,), (), (), (String,), (), ())>;
