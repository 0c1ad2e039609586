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

//! `multipart/form-data` encoding of upload bodies

use crate::storage::error::ValidationErr;
use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

/// Name of the form field carrying the object data.
pub(crate) const FILE_FIELD: &str = "file";

/// A fully buffered multipart body with its request content type.
#[derive(Clone, Debug)]
pub(crate) struct MultipartBody {
    pub(crate) content_type: String,
    pub(crate) body: Bytes,
}

fn escape_filename(filename: &str) -> Result<String, ValidationErr> {
    if filename.contains(['\r', '\n']) {
        return Err(ValidationErr::InvalidFileName(format!(
            "file name {filename:?} contains a line break"
        )));
    }
    Ok(filename.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Encodes `data` as the single `file` part of a form, with a random boundary.
pub(crate) fn encode_file_part(filename: &str, data: &[u8]) -> Result<MultipartBody, ValidationErr> {
    encode_with_boundary(&Uuid::new_v4().simple().to_string(), filename, data)
}

fn encode_with_boundary(
    boundary: &str,
    filename: &str,
    data: &[u8],
) -> Result<MultipartBody, ValidationErr> {
    let filename = escape_filename(filename)?;

    let head = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{FILE_FIELD}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    );
    let tail = format!("\r\n--{boundary}--\r\n");

    let mut body = BytesMut::with_capacity(head.len() + data.len() + tail.len());
    body.put_slice(head.as_bytes());
    body.put_slice(data);
    body.put_slice(tail.as_bytes());

    Ok(MultipartBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        body: body.freeze(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_part_layout() {
        let mp = encode_with_boundary("xyz", "hello.txt", b"Hello, World!").unwrap();
        assert_eq!(mp.content_type, "multipart/form-data; boundary=xyz");
        assert_eq!(
            mp.body.as_ref(),
            b"--xyz\r\n\
              Content-Disposition: form-data; name=\"file\"; filename=\"hello.txt\"\r\n\
              Content-Type: application/octet-stream\r\n\r\n\
              Hello, World!\r\n--xyz--\r\n"
                .as_slice()
        );
    }

    #[test]
    fn empty_payload_still_has_one_part() {
        let mp = encode_with_boundary("b", "empty.bin", b"").unwrap();
        let text = String::from_utf8(mp.body.to_vec()).unwrap();
        assert!(text.ends_with("\r\n\r\n\r\n--b--\r\n"));
        assert_eq!(text.matches("--b\r\n").count(), 1);
    }

    #[test]
    fn filename_is_escaped() {
        let mp = encode_with_boundary("b", r#"my "quoted" \name"#, b"x").unwrap();
        let text = String::from_utf8(mp.body.to_vec()).unwrap();
        assert!(text.contains(r#"filename="my \"quoted\" \\name""#));
        assert!(encode_with_boundary("b", "bad\r\nname", b"x").is_err());
    }

    #[test]
    fn random_boundaries_differ() {
        let a = encode_file_part("a", b"1").unwrap();
        let b = encode_file_part("a", b"1").unwrap();
        assert_ne!(a.content_type, b.content_type);
        assert!(a.content_type.starts_with("multipart/form-data; boundary="));
    }
}
