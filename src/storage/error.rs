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

//! Error definitions for storage operations
//!
//! Errors are grouped by where the failure happened: building the request
//! ([`ValidationErr`]), moving bytes over the network ([`NetworkError`]), the
//! server rejecting the request ([`OperationError`]), or a successful response
//! that could not be decoded ([`DecodeErr`]).

use crate::storage::types::Operation;
use thiserror::Error;

/// Errors raised while building a request. No network call has been made.
#[derive(Error, Debug)]
pub enum ValidationErr {
    #[error("invalid bucket name: '{name}' - {reason}")]
    InvalidBucketName { name: String, reason: String },

    #[error("invalid object name: {0}")]
    InvalidObjectName(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] http::uri::InvalidUri),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("invalid value for header '{name}'")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: http::header::InvalidHeaderValue,
    },

    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(#[source] reqwest::Error),
}

/// Errors raised while talking to the server.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request cancelled before completion")]
    Cancelled,
}

impl NetworkError {
    /// Returns `true` if the request failed because the client timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, NetworkError::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the request was aborted through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, NetworkError::Cancelled)
    }
}

/// The server answered with a status code outside the set accepted by the operation.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{operation} failed: {server_message} (status: {status_code})")]
pub struct OperationError {
    status_code: u16,
    server_message: String,
    operation: Operation,
}

impl OperationError {
    pub fn new(status_code: u16, server_message: impl Into<String>, operation: Operation) -> Self {
        Self {
            status_code,
            server_message: server_message.into(),
            operation,
        }
    }

    /// HTTP status code returned by the server.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Full response body, decoded as (lossy) UTF-8 text.
    pub fn server_message(&self) -> &str {
        &self.server_message
    }

    /// The operation that was rejected.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Server-side failures (5xx) may succeed if tried again. The client never
    /// retries on its own.
    pub fn is_retryable(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Returns `true` for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }
}

/// The server reported success but the body or headers could not be decoded.
#[derive(Error, Debug)]
pub enum DecodeErr {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] xmltree::ParseError),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("invalid integer in '{field}': {source}")]
    InvalidInteger {
        field: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid timestamp in '{field}': {source}")]
    InvalidTimestamp {
        field: &'static str,
        #[source]
        source: chrono::ParseError,
    },

    #[error("header '{name}' is not valid text")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: http::header::ToStrError,
    },
}

/// Local file system errors.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),
}

/// Top level error returned by every operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErr),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("{0}")]
    Operation(#[from] OperationError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeErr),

    #[error("io error: {0}")]
    Io(#[from] IoError),
}

impl Error {
    /// Returns the [`OperationError`] if the server rejected the request.
    pub fn as_operation_error(&self) -> Option<&OperationError> {
        match self {
            Error::Operation(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status code, if the server answered with a rejected status.
    pub fn status_code(&self) -> Option<u16> {
        self.as_operation_error().map(OperationError::status_code)
    }

    /// Returns `true` if the request was aborted through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Network(e) if e.is_cancelled())
    }

    /// Returns `true` if the client timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Network(e) if e.is_timeout())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(NetworkError::Transport(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(IoError::IOError(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_error_classification() {
        let e = OperationError::new(503, "slow down", Operation::PutObject);
        assert!(e.is_retryable());
        assert!(!e.is_client_error());

        let e = OperationError::new(404, "not found", Operation::GetObject);
        assert!(!e.is_retryable());
        assert!(e.is_client_error());
    }

    #[test]
    fn operation_error_display() {
        let e = OperationError::new(409, "bucket exists", Operation::CreateBucket);
        assert_eq!(
            e.to_string(),
            "create bucket failed: bucket exists (status: 409)"
        );

        let err: Error = e.into();
        assert_eq!(err.status_code(), Some(409));
        assert!(!err.is_cancelled());
    }

    #[test]
    fn cancelled_is_not_timeout() {
        let err: Error = NetworkError::Cancelled.into();
        assert!(err.is_cancelled());
        assert!(!err.is_timeout());
        assert_eq!(err.status_code(), None);
    }
}
