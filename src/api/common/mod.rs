//
//  tonicpow
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Error handling and list/pagination types shared by every resource.
//!
//! # Overview
//!
//! - [`Error`] - the error returned by every client operation
//! - [`ApiError`] - the error body the API sends with a non-success status
//! - Pagination and list options (re-exported from [`pagination`])
//!
//! # Example
//!
//! ```rust
//! use tonicpow::api::common::Error;
//!
//! fn describe(err: &Error) -> String {
//!     match err {
//!         Error::MissingField(field) => format!("fill in {field}"),
//!         Error::Api(api) if api.status_code == 404 => "not found".to_string(),
//!         other => other.to_string(),
//!     }
//! }
//!
//! assert_eq!(describe(&Error::MissingField("id")), "fill in id");
//! ```

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod pagination;

pub use pagination::*;

/// Result alias used throughout the client.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by client operations.
///
/// Local validation failures (`MissingField`, `Validation`,
/// `InvalidSortField`) are raised before any network call is made.
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `MissingField` | A required attribute is zero or empty |
/// | `Validation` | Other local input checks fail |
/// | `InvalidSortField` | `sort_by` is not in the resource's allow-list |
/// | `Configuration` | The client cannot be built from its options |
/// | `Api` | The server answered with an unexpected status |
/// | `Transport` | The HTTP request could not be completed |
/// | `Decode` | A JSON body could not be encoded or decoded |
#[derive(Error, Debug)]
pub enum Error {
    /// A required attribute was not supplied.
    #[error("missing required attribute: {0}")]
    MissingField(&'static str),

    /// Input failed a local check other than a missing field.
    #[error("{0}")]
    Validation(String),

    /// The requested sort field is not accepted by the endpoint.
    #[error("sort by {0} is not valid")]
    InvalidSortField(String),

    /// The client options are unusable.
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// The API returned an error body. Displays the API's message verbatim.
    #[error("{0}")]
    Api(Box<ApiError>),

    /// Connection, TLS, timeout or protocol failure, after any retries.
    #[error(transparent)]
    Transport(#[from] reqwest_middleware::Error),

    /// JSON encoding or decoding failed.
    #[error("failed to process JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.into())
    }
}

impl Error {
    /// HTTP status of an [`Error::Api`], if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(api) => StatusCode::from_u16(api.status_code).ok(),
            Self::Transport(reqwest_middleware::Error::Reqwest(e)) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns `true` if the error was raised locally without a network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::Validation(_) | Self::InvalidSortField(_)
        )
    }
}

/// The universal error body returned by the TonicPow API.
///
/// ```json
/// {"code": 400, "message": "some error message", "method": "GET", "url": "/v1/..."}
/// ```
///
/// All fields are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Application error code.
    #[serde(default)]
    pub code: i64,

    /// Extra data attached by the API.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,

    /// Caller IP as seen by the API.
    #[serde(default)]
    pub ip_address: String,

    /// HTTP method of the failed request.
    #[serde(default)]
    pub method: String,

    /// Human readable message.
    #[serde(default)]
    pub message: String,

    /// Server-side request identifier, useful for support tickets.
    #[serde(default)]
    pub request_guid: String,

    /// HTTP status of the response.
    #[serde(default)]
    pub status_code: u16,

    /// Request URL as seen by the API.
    #[serde(default)]
    pub url: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "unexpected status code {}", self.status_code)
        } else {
            f.write_str(&self.message)
        }
    }
}

/// Parses an API error body into an [`Error`].
///
/// The response status fills in `status_code` when the body omits it. A
/// body that is not an error object yields [`Error::Decode`].
///
/// # Parameters
///
/// * `status` - The HTTP status code
/// * `body` - The raw response body
///
/// # Example
///
/// ```rust
/// use reqwest::StatusCode;
/// use tonicpow::api::common::format_api_error;
///
/// let err = format_api_error(
///     StatusCode::BAD_REQUEST,
///     br#"{"code":400,"message":"some error message"}"#,
/// );
/// assert_eq!(err.to_string(), "some error message");
/// ```
pub fn format_api_error(status: StatusCode, body: &[u8]) -> Error {
    match parse_api_error(status, body) {
        Ok(api) => Error::Api(Box::new(api)),
        Err(e) => Error::Decode(e),
    }
}

pub(crate) fn parse_api_error(
    status: StatusCode,
    body: &[u8],
) -> std::result::Result<ApiError, serde_json::Error> {
    let mut api: ApiError = serde_json::from_slice(body)?;
    if api.status_code == 0 {
        api.status_code = status.as_u16();
    }
    Ok(api)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_is_message() {
        let err = format_api_error(
            StatusCode::BAD_REQUEST,
            br#"{"code":400,"message":"some error message"}"#,
        );
        assert_eq!(err.to_string(), "some error message");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_api_error_without_message() {
        let err = format_api_error(StatusCode::INTERNAL_SERVER_ERROR, b"{}");
        assert_eq!(err.to_string(), "unexpected status code 500");
    }

    #[test]
    fn test_body_status_wins() {
        let err = format_api_error(
            StatusCode::OK,
            br#"{"message":"gone","status_code":404,"request_guid":"abc"}"#,
        );
        assert!(err.is_not_found());
        match err {
            Error::Api(api) => assert_eq!(api.request_guid, "abc"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body_is_decode_error() {
        let err = format_api_error(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_local_error_messages() {
        assert_eq!(
            Error::MissingField("advertiser_profile_id").to_string(),
            "missing required attribute: advertiser_profile_id"
        );
        assert_eq!(
            Error::InvalidSortField("bad_field".into()).to_string(),
            "sort by bad_field is not valid"
        );
        assert!(Error::InvalidSortField("x".into()).is_validation());
        assert!(!Error::Configuration("x".into()).is_validation());
    }
}
