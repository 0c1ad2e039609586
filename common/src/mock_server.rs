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

//! In-process storage server speaking the bucket and object HTTP API, used by
//! the integration tests.

use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use gtm_storage::storage::response::{PREVIEW_LABEL, THUMBNAIL_LABEL};
use gtm_storage::storage::utils::to_http_header_value;
use http::{HeaderMap, Method, Request, Response, StatusCode, header};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type MockResponse = Response<Full<Bytes>>;

#[derive(Clone, Debug)]
pub struct StoredObject {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
    pub etag: String,
    pub last_modified: DateTime<Utc>,
}

/// A request as seen by the server.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body_len: usize,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Default)]
struct Inner {
    buckets: BTreeMap<String, BTreeMap<String, StoredObject>>,
    requests: Vec<RecordedRequest>,
    forced_response: Option<(StatusCode, String)>,
    delay: Option<Duration>,
}

struct MockState {
    api_key: Option<String>,
    inner: Mutex<Inner>,
}

impl MockState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let Some(key) = self.api_key.as_deref() else {
            return true;
        };
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        let api_key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
        bearer == Some(key) || api_key == Some(key)
    }
}

/// Storage server bound to an ephemeral local port. Stops accepting
/// connections when dropped.
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Starts a server. With `api_key` set, bucket and object mutations
    /// without that key are answered with `401`.
    pub async fn start(api_key: Option<&str>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(MockState {
            api_key: api_key.map(str::to_string),
            inner: Mutex::new(Inner::default()),
        });
        let handle = tokio::spawn(serve(listener, Arc::clone(&state)));
        log::debug!("mock storage server listening on {addr}");
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().requests.last().cloned()
    }

    /// Answers every following request with `status` and `message`.
    pub fn fail_with(&self, status: StatusCode, message: &str) {
        self.respond_with(status, message);
    }

    /// Answers every following request with `status` and a raw `body`,
    /// bypassing routing. Success statuses are allowed.
    pub fn respond_with(&self, status: StatusCode, body: &str) {
        self.state.lock().forced_response = Some((status, body.to_string()));
    }

    pub fn clear_failure(&self) {
        self.state.lock().forced_response = None;
    }

    /// Holds every following response back for `delay`.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.state.lock().delay = delay;
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.state.lock().buckets.contains_key(bucket)
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.state
            .lock()
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(listener: TcpListener, state: Arc<MockState>) {
    loop {
        let (stream, remote_addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                log::error!("failed to accept connection: {e}");
                continue;
            }
        };

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { Ok::<_, Infallible>(handle(state, req).await) }
            });

            if let Err(e) = http1::Builder::new()
                .keep_alive(true)
                .serve_connection(io, service)
                .await
            {
                log::debug!("connection from {remote_addr} ended: {e}");
            }
        });
    }
}

fn text(status: StatusCode, message: &str) -> MockResponse {
    let mut resp = Response::new(Full::new(Bytes::from(message.to_string())));
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        http::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    resp
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (decode(&k.replace('+', " ")) == name).then(|| decode(&v.replace('+', " ")))
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn unescape_quoted(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '"' => break,
            c => out.push(c),
        }
    }
    out
}

/// Extracts file name and data of the `file` part of a form.
fn parse_multipart(body: &[u8], boundary: &str) -> Option<(String, Bytes)> {
    let delimiter = format!("--{boundary}");
    let start = find(body, delimiter.as_bytes())? + delimiter.len();
    let rest = body[start..].strip_prefix(b"\r\n")?;

    let header_end = find(rest, b"\r\n\r\n")?;
    let part_headers = std::str::from_utf8(&rest[..header_end]).ok()?;
    let data = &rest[header_end + 4..];
    let data_len = find(data, format!("\r\n--{boundary}").as_bytes())?;

    let disposition = part_headers
        .lines()
        .find(|l| l.to_ascii_lowercase().starts_with("content-disposition:"))?;
    if !disposition.contains("; name=\"file\"") {
        return None;
    }
    let filename = disposition
        .split_once("filename=\"")
        .map(|(_, r)| unescape_quoted(r))
        .unwrap_or_default();

    Some((filename, Bytes::copy_from_slice(&data[..data_len])))
}

fn guess_content_type(filename: &str) -> &'static str {
    let ext = filename.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

fn etag_of(data: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    data.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Parses `bytes=S-E`. `None` means the header is to be ignored.
fn parse_range(value: &str) -> Option<(u64, u64)> {
    let (start, end) = value.strip_prefix("bytes=")?.split_once('-')?;
    let start: u64 = start.trim().parse().ok()?;
    let end: u64 = end.trim().parse().ok()?;
    (start <= end).then_some((start, end))
}

async fn handle(state: Arc<MockState>, req: Request<Incoming>) -> MockResponse {
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => return text(StatusCode::BAD_REQUEST, &format!("unreadable body: {e}")),
    };

    let (delay, forced) = {
        let mut inner = state.lock();
        inner.requests.push(RecordedRequest {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            headers: parts.headers.clone(),
            body_len: body.len(),
        });
        (inner.delay, inner.forced_response.clone())
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if let Some((status, message)) = forced {
        return text(status, &message);
    }

    let path = parts.uri.path();
    let Some(rest) = path.strip_prefix("/api/") else {
        return text(StatusCode::NOT_FOUND, "no such route");
    };
    let (bucket, key) = match rest.split_once('/') {
        Some((b, k)) if !k.is_empty() => (decode(b), Some(decode(k))),
        Some(_) => return text(StatusCode::BAD_REQUEST, "empty object key"),
        None => (decode(rest), None),
    };

    let method = &parts.method;
    if matches!(*method, Method::POST | Method::PUT | Method::DELETE)
        && !state.authorized(&parts.headers)
    {
        return text(StatusCode::UNAUTHORIZED, "missing or invalid API key");
    }

    match (method, key) {
        (&Method::POST, None) => create_bucket(&state, &bucket),
        (&Method::DELETE, None) => delete_bucket(&state, &bucket),
        (&Method::GET, None) => list_objects(&state, &bucket, parts.uri.query()),
        (&Method::PUT, Some(key)) => put_object(&state, &bucket, &key, &parts.headers, path, &body),
        (&Method::GET, Some(key)) => get_object(&state, &bucket, &key, &parts.headers),
        (&Method::HEAD, Some(key)) => head_object(&state, &bucket, &key),
        (&Method::DELETE, Some(key)) => delete_object(&state, &bucket, &key),
        _ => text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
    }
}

fn create_bucket(state: &MockState, bucket: &str) -> MockResponse {
    let mut inner = state.lock();
    if inner.buckets.contains_key(bucket) {
        return text(StatusCode::CONFLICT, &format!("bucket {bucket} already exists"));
    }
    inner.buckets.insert(bucket.to_string(), BTreeMap::new());
    text(StatusCode::OK, &format!("bucket {bucket} created"))
}

fn delete_bucket(state: &MockState, bucket: &str) -> MockResponse {
    let mut inner = state.lock();
    match inner.buckets.get(bucket) {
        None => text(StatusCode::NOT_FOUND, &format!("bucket {bucket} not found")),
        Some(objects) if !objects.is_empty() => {
            text(StatusCode::CONFLICT, &format!("bucket {bucket} is not empty"))
        }
        Some(_) => {
            inner.buckets.remove(bucket);
            text(StatusCode::OK, &format!("bucket {bucket} deleted"))
        }
    }
}

fn put_object(
    state: &MockState,
    bucket: &str,
    key: &str,
    headers: &HeaderMap,
    path: &str,
    body: &[u8],
) -> MockResponse {
    let boundary = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|ct| ct.starts_with("multipart/form-data"))
        .and_then(|ct| {
            ct.split(';')
                .find_map(|p| p.trim().strip_prefix("boundary=").map(str::to_string))
        });
    let Some(boundary) = boundary else {
        return text(StatusCode::BAD_REQUEST, "expected multipart/form-data");
    };
    let Some((filename, data)) = parse_multipart(body, &boundary) else {
        return text(StatusCode::BAD_REQUEST, "missing file field");
    };

    let content_type = guess_content_type(&filename);
    let etag = etag_of(&data);
    let object = StoredObject {
        data,
        filename,
        content_type: content_type.to_string(),
        etag: etag.clone(),
        last_modified: Utc::now(),
    };

    let mut inner = state.lock();
    let Some(objects) = inner.buckets.get_mut(bucket) else {
        return text(StatusCode::NOT_FOUND, &format!("bucket {bucket} not found"));
    };
    objects.insert(key.to_string(), object);
    drop(inner);

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let mut message = format!("上传成功\n{PREVIEW_LABEL} http://{host}{path}\n");
    if content_type.starts_with("image/") {
        let thumb_path = path.replacen("/api/", "/thumb/", 1);
        message.push_str(&format!("{THUMBNAIL_LABEL} http://{host}{thumb_path}\n"));
    }

    let mut resp = text(StatusCode::OK, &message);
    if let Ok(v) = http::HeaderValue::from_str(&format!("\"{etag}\"")) {
        resp.headers_mut().insert(header::ETAG, v);
    }
    resp
}

fn lookup(state: &MockState, bucket: &str, key: &str) -> Result<StoredObject, MockResponse> {
    let inner = state.lock();
    let Some(objects) = inner.buckets.get(bucket) else {
        return Err(text(StatusCode::NOT_FOUND, &format!("bucket {bucket} not found")));
    };
    objects
        .get(key)
        .cloned()
        .ok_or_else(|| text(StatusCode::NOT_FOUND, &format!("object {key} not found")))
}

fn object_headers(resp: &mut MockResponse, object: &StoredObject) {
    let headers = resp.headers_mut();
    if let Ok(v) = http::HeaderValue::from_str(&object.content_type) {
        headers.insert(header::CONTENT_TYPE, v);
    }
    if let Ok(v) = http::HeaderValue::from_str(&format!("\"{}\"", object.etag)) {
        headers.insert(header::ETAG, v);
    }
    if let Ok(v) = http::HeaderValue::from_str(&to_http_header_value(object.last_modified)) {
        headers.insert(header::LAST_MODIFIED, v);
    }
}

fn get_object(state: &MockState, bucket: &str, key: &str, headers: &HeaderMap) -> MockResponse {
    let object = match lookup(state, bucket, key) {
        Ok(o) => o,
        Err(resp) => return resp,
    };
    let len = object.data.len() as u64;

    let range = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_range);

    let mut resp = match range {
        Some((start, _)) if start >= len => {
            let mut resp = text(StatusCode::RANGE_NOT_SATISFIABLE, "range not satisfiable");
            if let Ok(v) = http::HeaderValue::from_str(&format!("bytes */{len}")) {
                resp.headers_mut().insert(header::CONTENT_RANGE, v);
            }
            return resp;
        }
        Some((start, end)) => {
            let end = end.min(len - 1);
            let slice = object.data.slice(start as usize..=end as usize);
            let mut resp = Response::new(Full::new(slice));
            *resp.status_mut() = StatusCode::PARTIAL_CONTENT;
            if let Ok(v) = http::HeaderValue::from_str(&format!("bytes {start}-{end}/{len}")) {
                resp.headers_mut().insert(header::CONTENT_RANGE, v);
            }
            resp
        }
        None => Response::new(Full::new(object.data.clone())),
    };
    object_headers(&mut resp, &object);
    resp
}

fn head_object(state: &MockState, bucket: &str, key: &str) -> MockResponse {
    let object = match lookup(state, bucket, key) {
        Ok(o) => o,
        Err(resp) => return resp,
    };
    let mut resp = Response::new(Full::new(Bytes::new()));
    object_headers(&mut resp, &object);
    resp.headers_mut()
        .insert(header::CONTENT_LENGTH, http::HeaderValue::from(object.data.len() as u64));
    resp
}

fn delete_object(state: &MockState, bucket: &str, key: &str) -> MockResponse {
    let mut inner = state.lock();
    let Some(objects) = inner.buckets.get_mut(bucket) else {
        return text(StatusCode::NOT_FOUND, &format!("bucket {bucket} not found"));
    };
    match objects.remove(key) {
        Some(_) => text(StatusCode::OK, &format!("object {key} deleted")),
        None => text(StatusCode::NOT_FOUND, &format!("object {key} not found")),
    }
}

fn list_objects(state: &MockState, bucket: &str, query: Option<&str>) -> MockResponse {
    let prefix = query_param(query, "prefix").unwrap_or_default();
    let inner = state.lock();
    let Some(objects) = inner.buckets.get(bucket) else {
        return text(StatusCode::NOT_FOUND, &format!("bucket {bucket} not found"));
    };

    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push_str("\n<ListBucketResult>");
    xml.push_str(&format!("<Name>{}</Name>", xml_escape(bucket)));
    xml.push_str(&format!("<Prefix>{}</Prefix>", xml_escape(&prefix)));
    for (key, object) in objects.iter().filter(|(k, _)| k.starts_with(&prefix)) {
        xml.push_str("<Contents>");
        xml.push_str(&format!("<Key>{}</Key>", xml_escape(key)));
        xml.push_str(&format!("<Name>{}</Name>", xml_escape(&object.filename)));
        xml.push_str(&format!(
            "<ContentType>{}</ContentType>",
            xml_escape(&object.content_type)
        ));
        xml.push_str(&format!(
            "<LastModified>{}</LastModified>",
            object.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str(&format!("<ETag>&quot;{}&quot;</ETag>", object.etag));
        xml.push_str(&format!("<Size>{}</Size>", object.data.len()));
        xml.push_str("</Contents>");
    }
    xml.push_str("</ListBucketResult>");
    drop(inner);

    let mut resp = text(StatusCode::OK, &xml);
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/xml"),
    );
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_round_trip() {
        let body = b"--b1\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a \\\"q\\\".txt\"\r\nContent-Type: application/octet-stream\r\n\r\nhello\r\nworld\r\n--b1--\r\n";
        let (filename, data) = parse_multipart(body, "b1").unwrap();
        assert_eq!(filename, "a \"q\".txt");
        assert_eq!(data.as_ref(), b"hello\r\nworld");
    }

    #[test]
    fn range_parsing() {
        assert_eq!(parse_range("bytes=0-4"), Some((0, 4)));
        assert_eq!(parse_range("bytes=5-0"), None);
        assert_eq!(parse_range("items=0-4"), None);
    }

    #[test]
    fn query_decoding() {
        assert_eq!(
            query_param(Some("prefix=photos%2F2024%20x"), "prefix").as_deref(),
            Some("photos/2024 x")
        );
        assert_eq!(query_param(Some("a=1"), "prefix"), None);
        assert_eq!(query_param(None, "prefix"), None);
    }
}
