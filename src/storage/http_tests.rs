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

use super::http::{BaseUrl, Url};
use super::multimap_ext::{Multimap, MultimapExt};

// ===========================
// Url Tests
// ===========================

#[test]
fn test_url_default() {
    let url = Url::default();
    assert!(url.https);
    assert!(url.host.is_empty());
    assert_eq!(url.port, 0);
    assert!(url.path.is_empty());
    assert!(url.query.is_empty());
}

#[test]
fn test_url_host_header_value() {
    let mut url = Url {
        https: true,
        host: "example.com".to_string(),
        port: 3000,
        path: "/".to_string(),
        query: Multimap::default(),
    };
    assert_eq!(url.host_header_value(), "example.com:3000");
    url.port = 0;
    assert_eq!(url.host_header_value(), "example.com");
}

#[test]
fn test_url_display_with_query() {
    let mut query = Multimap::new();
    query.add("prefix", "a b");
    let url = Url {
        https: false,
        host: "localhost".to_string(),
        port: 3000,
        path: "/api/photos".to_string(),
        query,
    };
    assert_eq!(url.to_string(), "http://localhost:3000/api/photos?prefix=a%20b");
}

// ===========================
// BaseUrl Tests
// ===========================

#[test]
fn test_base_url_trailing_slashes_are_stripped() {
    let base: BaseUrl = "http://127.0.0.1:3000///".parse().unwrap();
    assert!(!base.https);
    assert_eq!(base.host(), "127.0.0.1");
    assert_eq!(base.port(), 3000);
    assert_eq!(base.path(), "");
    assert_eq!(base.to_string(), "http://127.0.0.1:3000");
}

#[test]
fn test_base_url_keeps_path_prefix() {
    let base: BaseUrl = "https://gateway.example.com/storage/".parse().unwrap();
    assert!(base.https);
    assert_eq!(base.path(), "/storage");
    let url = base.build_url("photos", Some("a.jpg"), &Multimap::new());
    assert_eq!(url.to_string(), "https://gateway.example.com/storage/api/photos/a.jpg");
}

#[test]
fn test_base_url_without_scheme_is_https() {
    let base: BaseUrl = "storage.example.com:8443".parse().unwrap();
    assert!(base.https);
    assert_eq!(base.host(), "storage.example.com");
    assert_eq!(base.port(), 8443);
}

#[test]
fn test_base_url_rejects_bad_input() {
    assert!("".parse::<BaseUrl>().is_err());
    assert!("/".parse::<BaseUrl>().is_err());
    assert!("ftp://example.com".parse::<BaseUrl>().is_err());
    assert!("http://example.com/?a=1".parse::<BaseUrl>().is_err());
    assert!("http://exa mple.com".parse::<BaseUrl>().is_err());
}

// ===========================
// build_url Tests
// ===========================

#[test]
fn test_build_bucket_url() {
    let base: BaseUrl = "http://localhost:3000".parse().unwrap();
    let url = base.build_url("photos", None, &Multimap::new());
    assert_eq!(url.path, "/api/photos");
    assert_eq!(url.to_string(), "http://localhost:3000/api/photos");
}

#[test]
fn test_build_object_url_keeps_nested_key_structure() {
    let base: BaseUrl = "http://localhost:3000".parse().unwrap();
    let url = base.build_url("photos", Some("2024/05/beach day.jpg"), &Multimap::new());
    assert_eq!(url.path, "/api/photos/2024/05/beach%20day.jpg");
}

#[test]
fn test_build_url_encodes_reserved_characters() {
    let base: BaseUrl = "http://localhost:3000".parse().unwrap();
    let url = base.build_url("photos", Some("a?b#c%d"), &Multimap::new());
    assert_eq!(url.path, "/api/photos/a%3Fb%23c%25d");
}

#[test]
fn test_build_url_with_query() {
    let base: BaseUrl = "http://localhost:3000".parse().unwrap();
    let mut query = Multimap::new();
    query.add("prefix", "photos/");
    let url = base.build_url("b", None, &query);
    assert_eq!(url.to_string(), "http://localhost:3000/api/b?prefix=photos%2F");
}
