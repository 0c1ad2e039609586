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

//! Object bodies: the streamed download body and upload payload sources

use crate::storage::error::{Error, NetworkError};
use crate::storage::utils::with_cancellation;
use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use std::fmt;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

type IoResult<T> = Result<T, std::io::Error>;

/// Body of a successful download.
///
/// Owns the underlying HTTP response: dropping it releases the connection,
/// whether or not the body was read. Reads honor the cancellation token of
/// the request that produced it.
#[derive(Debug)]
pub struct ObjectContent {
    response: reqwest::Response,
    size: Option<u64>,
    cancellation_token: Option<CancellationToken>,
}

impl ObjectContent {
    pub(crate) fn new(
        response: reqwest::Response,
        cancellation_token: Option<CancellationToken>,
    ) -> Self {
        let size = response.content_length();
        Self {
            response,
            size,
            cancellation_token,
        }
    }

    /// Length announced by the server, if any.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Next chunk of the body, or `None` once it is exhausted.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>, Error> {
        let token = self.cancellation_token.clone();
        let response = &mut self.response;
        with_cancellation(token, async move {
            response
                .chunk()
                .await
                .map_err(|e| Error::Network(NetworkError::Transport(e)))
        })
        .await
    }

    /// Reads the whole body into memory.
    pub async fn to_bytes(mut self) -> Result<Bytes, Error> {
        let mut buf = match self.size {
            Some(n) => BytesMut::with_capacity(n.min(64 * 1024 * 1024) as usize),
            None => BytesMut::new(),
        };
        while let Some(chunk) = self.chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Writes the body to `file_path` and returns the number of bytes written.
    ///
    /// Data goes to a temporary file next to the target which is renamed into
    /// place once complete, so a failed download never leaves a partial file
    /// under the final name.
    pub async fn to_file(mut self, file_path: &Path) -> Result<u64, Error> {
        if file_path.is_dir() {
            return Err(std::io::Error::other("path is a directory").into());
        }
        let parent_dir = match file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent_dir.is_dir() {
            tokio::fs::create_dir_all(&parent_dir).await?;
        }
        let file_name = file_path
            .file_name()
            .ok_or_else(|| std::io::Error::other("could not get filename-component of path"))?;
        let mut tmp_file_name = file_name.to_os_string();
        tmp_file_name.push(format!(".{}.part", Uuid::new_v4().simple()));
        let tmp_file_path = parent_dir.join(tmp_file_name);

        let mut fp = tokio::fs::File::create(&tmp_file_path).await?;
        let mut total_bytes_written = 0;
        let written = async {
            while let Some(chunk) = self.chunk().await? {
                fp.write_all(&chunk).await?;
                total_bytes_written += chunk.len() as u64;
            }
            fp.flush().await?;
            Ok::<(), Error>(())
        }
        .await;

        if let Err(e) = written {
            drop(fp);
            if let Err(rm) = tokio::fs::remove_file(&tmp_file_path).await {
                log::warn!("failed to remove {tmp_file_path:?}: {rm}");
            }
            return Err(e);
        }

        tokio::fs::rename(&tmp_file_path, file_path).await?;
        Ok(total_bytes_written)
    }

    /// Turns the body into a stream of chunks. The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, Error>> + Send {
        futures_util::stream::unfold(Some(self), |state| async move {
            let mut content = state?;
            match content.chunk().await {
                Ok(Some(chunk)) => Some((Ok(chunk), Some(content))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Reads and discards the rest of the body, then releases the connection.
    pub async fn close(mut self) -> Result<(), Error> {
        while self.chunk().await?.is_some() {}
        Ok(())
    }
}

/// Source of the data of an upload. Every source is fully buffered before
/// the request is sent.
pub enum UploadContent {
    Bytes(Bytes),
    File(PathBuf),
    Stream(Pin<Box<dyn Stream<Item = IoResult<Bytes>> + Send>>),
}

impl UploadContent {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        UploadContent::File(path.into())
    }

    pub fn from_stream(stream: impl Stream<Item = IoResult<Bytes>> + Send + 'static) -> Self {
        UploadContent::Stream(Box::pin(stream))
    }

    /// Base name of the source file, used as the upload file name when none is given.
    pub fn file_name(&self) -> Option<String> {
        match self {
            UploadContent::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            _ => None,
        }
    }

    pub(crate) async fn into_bytes(self) -> Result<Bytes, Error> {
        match self {
            UploadContent::Bytes(b) => Ok(b),
            UploadContent::File(path) => Ok(Bytes::from(tokio::fs::read(&path).await?)),
            UploadContent::Stream(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk?);
                }
                Ok(buf.freeze())
            }
        }
    }
}

impl fmt::Debug for UploadContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadContent::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            UploadContent::File(p) => f.debug_tuple("File").field(p).finish(),
            UploadContent::Stream(_) => f.write_str("Stream"),
        }
    }
}

impl From<Bytes> for UploadContent {
    fn from(value: Bytes) -> Self {
        UploadContent::Bytes(value)
    }
}

impl From<Vec<u8>> for UploadContent {
    fn from(value: Vec<u8>) -> Self {
        UploadContent::Bytes(Bytes::from(value))
    }
}

impl From<String> for UploadContent {
    fn from(value: String) -> Self {
        UploadContent::Bytes(Bytes::from(value))
    }
}

impl From<&'static str> for UploadContent {
    fn from(value: &'static str) -> Self {
        UploadContent::Bytes(Bytes::from_static(value.as_bytes()))
    }
}

impl From<&'static [u8]> for UploadContent {
    fn from(value: &'static [u8]) -> Self {
        UploadContent::Bytes(Bytes::from_static(value))
    }
}

impl From<PathBuf> for UploadContent {
    fn from(value: PathBuf) -> Self {
        UploadContent::File(value)
    }
}

impl From<&Path> for UploadContent {
    fn from(value: &Path) -> Self {
        UploadContent::File(value.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stream_content_is_buffered_in_order() {
        let chunks: Vec<IoResult<Bytes>> = vec![
            Ok(Bytes::from_static(b"Hello, ")),
            Ok(Bytes::from_static(b"World!")),
        ];
        let content = UploadContent::from_stream(futures_util::stream::iter(chunks));
        assert_eq!(content.file_name(), None);
        assert_eq!(content.into_bytes().await.unwrap().as_ref(), b"Hello, World!");
    }

    #[tokio::test]
    async fn stream_error_is_propagated() {
        let chunks: Vec<IoResult<Bytes>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("boom")),
        ];
        let content = UploadContent::from_stream(futures_util::stream::iter(chunks));
        assert!(matches!(content.into_bytes().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let content = UploadContent::from_path("/definitely/not/here.bin");
        assert_eq!(content.file_name().as_deref(), Some("here.bin"));
        assert!(matches!(content.into_bytes().await, Err(Error::Io(_))));
    }
}
