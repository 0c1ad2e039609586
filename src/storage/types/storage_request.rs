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

//! StorageRequest struct and implementation for executing HTTP requests.

use crate::storage::client::Client;
use crate::storage::error::Error;
use crate::storage::http::Url;
use crate::storage::multimap_ext::Multimap;
use crate::storage::response::check_status;
use crate::storage::types::{FromStorageResponse, Operation};
use crate::storage::utils::with_cancellation;
use bytes::Bytes;
use http::Method;
use tokio_util::sync::CancellationToken;
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, TypedBuilder)]
/// Generic storage request
pub struct StorageRequest {
    #[builder(!default)] // force required
    pub(crate) client: Client,

    #[builder(!default)] // force required
    method: Method,

    #[builder(!default)] // force required
    pub(crate) operation: Operation,

    #[builder(setter(into))]
    pub(crate) bucket: String,

    #[builder(default, setter(into))]
    pub(crate) object: Option<String>,

    #[builder(default)]
    pub(crate) query_params: Multimap,

    #[builder(default)]
    pub(crate) headers: Multimap,

    #[builder(default, setter(into))]
    pub(crate) body: Option<Bytes>,

    /// When false, no `Authorization`/`X-API-Key` headers are sent.
    #[builder(default = true)]
    pub(crate) with_auth: bool,

    #[builder(default)]
    pub(crate) cancellation_token: Option<CancellationToken>,
}

impl StorageRequest {
    pub fn url(&self) -> Url {
        self.client
            .base_url()
            .build_url(&self.bucket, self.object.as_deref(), &self.query_params)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Execute the request and reject statuses the operation does not accept.
    /// Only used in [`StorageRequest::dispatch`].
    pub async fn execute(&mut self) -> Result<reqwest::Response, Error> {
        let url = self.url();
        let resp = self
            .client
            .execute(
                self.method.clone(),
                &url,
                &self.headers,
                self.body.take(),
                self.with_auth,
            )
            .await?;
        check_status(self.operation, resp).await
    }

    /// Runs the exchange and decodes the response, racing the whole thing
    /// against the cancellation token when one is set.
    pub(crate) async fn dispatch<R: FromStorageResponse>(mut self) -> Result<R, Error> {
        let token = self.cancellation_token.clone();
        with_cancellation(token, async move {
            let resp = self.execute().await;
            R::from_response(self, resp).await
        })
        .await
    }
}
