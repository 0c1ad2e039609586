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

use gtm_storage::storage::client::{
    DEFAULT_TIMEOUT, ENV_API_KEY, ENV_ENDPOINT, ENV_TIMEOUT_SECS,
};
use gtm_storage::storage::error::ValidationErr;
use gtm_storage::storage::types::StorageApi;
use gtm_storage::storage::{ClientBuilder, ClientConfig};
use gtm_storage_common::mock_server::MockServer;
use std::time::Duration;

fn set_env(key: &str, value: Option<&str>) {
    // SAFETY: this is the only test in this binary, so no other thread reads
    // the environment concurrently.
    unsafe {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}

#[tokio::test]
async fn config_from_env() {
    let _ = env_logger::builder().is_test(true).try_init();

    set_env(ENV_ENDPOINT, None);
    set_env(ENV_API_KEY, None);
    set_env(ENV_TIMEOUT_SECS, None);
    assert!(matches!(
        ClientConfig::from_env(),
        Err(ValidationErr::InvalidConfig(_))
    ));

    set_env(ENV_ENDPOINT, Some("ftp://storage.example.com"));
    assert!(ClientConfig::from_env().is_err());

    set_env(ENV_ENDPOINT, Some("https://storage.example.com/gw/"));
    set_env(ENV_TIMEOUT_SECS, Some("soon"));
    assert!(matches!(
        ClientConfig::from_env(),
        Err(ValidationErr::InvalidConfig(_))
    ));

    set_env(ENV_TIMEOUT_SECS, None);
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url.to_string(), "https://storage.example.com/gw");
    assert_eq!(config.api_key, None);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);

    set_env(ENV_API_KEY, Some("secret-key"));
    set_env(ENV_TIMEOUT_SECS, Some("5"));
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.api_key.as_deref(), Some("secret-key"));
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert!(!format!("{config:?}").contains("secret-key"));

    // a client built from the environment talks to the configured server
    let server = MockServer::start(Some("secret-key")).await.unwrap();
    set_env(ENV_ENDPOINT, Some(&format!("{}/", server.base_url())));
    let config = ClientConfig::from_env().unwrap();
    let client = ClientBuilder::from_config(config)
        .app_info(Some(("env-test".into(), "1.0".into())))
        .build()
        .unwrap();
    assert!(!client.is_secure());

    client.create_bucket("envbucket").build().send().await.unwrap();
    assert!(server.has_bucket("envbucket"));
    let req = server.last_request().unwrap();
    assert_eq!(req.header("x-api-key"), Some("secret-key"));
    assert!(
        req.header("user-agent")
            .is_some_and(|ua| ua.ends_with(" env-test/1.0"))
    );

    set_env(ENV_ENDPOINT, None);
    set_env(ENV_API_KEY, None);
    set_env(ENV_TIMEOUT_SECS, None);
}
