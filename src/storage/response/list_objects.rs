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

use crate::impl_has_storage_fields;
use crate::storage::error::{DecodeErr, Error};
use crate::storage::response::a_response_traits::HasBucket;
use crate::storage::types::{FromStorageResponse, ListingResult, ObjectMetadata, StorageRequest};
use crate::storage::utils::{from_rfc3339, get_text, get_text_default, get_text_option, trim_quotes};
use async_trait::async_trait;
use bytes::Buf;
use http::HeaderMap;
use std::mem;
use xmltree::Element;

/// Root element of a listing document.
const LISTING_ROOT: &str = "ListBucketResult";

fn parse_entry(entry: &Element) -> Result<ObjectMetadata, DecodeErr> {
    let size = match get_text_option(entry, "Size") {
        Some(v) if !v.trim().is_empty() => {
            v.trim()
                .parse::<u64>()
                .map_err(|source| DecodeErr::InvalidInteger {
                    field: "Size",
                    source,
                })?
        }
        _ => 0,
    };

    let last_modified = match get_text_option(entry, "LastModified") {
        Some(v) if !v.trim().is_empty() => Some(from_rfc3339(&v).map_err(|source| {
            DecodeErr::InvalidTimestamp {
                field: "LastModified",
                source,
            }
        })?),
        _ => None,
    };

    Ok(ObjectMetadata {
        key: get_text(entry, "Key")?,
        name: get_text_default(entry, "Name"),
        content_type: get_text_default(entry, "ContentType"),
        last_modified,
        etag: trim_quotes(&get_text_default(entry, "ETag")),
        size,
    })
}

/// Decodes a `ListBucketResult` document. Entries keep document order.
pub(crate) fn parse_listing(body: impl Buf) -> Result<ListingResult, DecodeErr> {
    let root = Element::parse(body.reader())?;
    if root.name != LISTING_ROOT {
        return Err(DecodeErr::XmlError(format!(
            "expected <{LISTING_ROOT}> but found <{}>",
            root.name
        )));
    }

    let objects = root
        .children
        .iter()
        .filter_map(|node| node.as_element())
        .filter(|e| e.name == "Contents")
        .map(parse_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ListingResult {
        bucket: get_text_default(&root, "Name"),
        prefix: get_text_default(&root, "Prefix"),
        objects,
    })
}

/// Response of
/// [list_objects()](crate::storage::Client::list_objects)
/// API
#[derive(Clone, Debug)]
pub struct ListObjectsResponse {
    request: StorageRequest,
    headers: HeaderMap,
    listing: ListingResult,
}

impl_has_storage_fields!(ListObjectsResponse);

impl HasBucket for ListObjectsResponse {}

impl ListObjectsResponse {
    pub fn listing(&self) -> &ListingResult {
        &self.listing
    }

    pub fn objects(&self) -> &[ObjectMetadata] {
        &self.listing.objects
    }

    pub fn into_listing(self) -> ListingResult {
        self.listing
    }
}

#[async_trait]
impl FromStorageResponse for ListObjectsResponse {
    async fn from_response(
        request: StorageRequest,
        response: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error> {
        let mut resp = response?;
        let headers: HeaderMap = mem::take(resp.headers_mut());
        let body = resp.bytes().await?;
        let listing = parse_listing(body)?;

        Ok(Self {
            request,
            headers,
            listing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const LISTING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult>
  <Name>photos</Name>
  <Prefix>2024/</Prefix>
  <Contents>
    <Key>2024/b.jpg</Key>
    <Name>b.jpg</Name>
    <ContentType>image/jpeg</ContentType>
    <LastModified>2024-05-01T10:20:30Z</LastModified>
    <ETag>"etag-b"</ETag>
    <Size>2048</Size>
  </Contents>
  <Contents>
    <Key>2024/a.jpg</Key>
    <Name>a.jpg</Name>
    <ContentType>image/jpeg</ContentType>
    <LastModified>2024-05-02T00:00:00+08:00</LastModified>
    <ETag>etag-a</ETag>
    <Size>10</Size>
  </Contents>
</ListBucketResult>"#;

    #[test]
    fn parses_listing_in_document_order() {
        let listing = parse_listing(LISTING.as_bytes()).unwrap();
        assert_eq!(listing.bucket, "photos");
        assert_eq!(listing.prefix, "2024/");
        assert_eq!(listing.keys().collect::<Vec<_>>(), ["2024/b.jpg", "2024/a.jpg"]);

        let b = &listing.objects[0];
        assert_eq!(b.name, "b.jpg");
        assert_eq!(b.content_type, "image/jpeg");
        assert_eq!(b.etag, "etag-b");
        assert_eq!(b.size, 2048);
        let t = b.last_modified.unwrap();
        assert_eq!((t.year(), t.month(), t.day(), t.hour()), (2024, 5, 1, 10));

        let a = &listing.objects[1];
        assert_eq!(a.etag, "etag-a");
        assert_eq!(a.last_modified.unwrap().hour(), 16);
        assert_eq!(a.last_modified.unwrap().day(), 1);
    }

    #[test]
    fn empty_listing() {
        let listing =
            parse_listing("<ListBucketResult><Name>b</Name><Prefix></Prefix></ListBucketResult>".as_bytes())
                .unwrap();
        assert_eq!(listing.bucket, "b");
        assert_eq!(listing.prefix, "");
        assert!(listing.objects.is_empty());
    }

    #[test]
    fn missing_optional_fields_default() {
        let listing = parse_listing(
            "<ListBucketResult><Contents><Key>k</Key></Contents></ListBucketResult>".as_bytes(),
        )
        .unwrap();
        let o = &listing.objects[0];
        assert_eq!(o.key, "k");
        assert_eq!(o.size, 0);
        assert!(o.last_modified.is_none());
    }

    #[test]
    fn malformed_documents_are_decode_errors() {
        assert!(matches!(
            parse_listing("<ListBucketResult><Contents>".as_bytes()),
            Err(DecodeErr::XmlParse(_))
        ));
        assert!(matches!(
            parse_listing("not xml at all".as_bytes()),
            Err(DecodeErr::XmlParse(_))
        ));
        assert!(matches!(
            parse_listing("<Error><Code>x</Code></Error>".as_bytes()),
            Err(DecodeErr::XmlError(_))
        ));
        assert!(matches!(
            parse_listing(
                "<ListBucketResult><Contents><Name>n</Name></Contents></ListBucketResult>".as_bytes()
            ),
            Err(DecodeErr::XmlError(_))
        ));
        assert!(matches!(
            parse_listing(
                "<ListBucketResult><Contents><Key>k</Key><Size>big</Size></Contents></ListBucketResult>"
                    .as_bytes()
            ),
            Err(DecodeErr::InvalidInteger { field: "Size", .. })
        ));
        assert!(matches!(
            parse_listing(
                "<ListBucketResult><Contents><Key>k</Key><LastModified>today</LastModified></Contents></ListBucketResult>"
                    .as_bytes()
            ),
            Err(DecodeErr::InvalidTimestamp { .. })
        ));
    }
}
