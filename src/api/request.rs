//
//  tonicpow
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request and response envelopes for the generic dispatcher.
//!
//! An [`ApiRequest`] describes one call: verb, relative path, query pairs,
//! optional JSON body and the status that counts as success. The dispatcher
//! answers with a [`StandardResponse`] holding the raw body plus diagnostics.
//!
//! ```rust
//! use reqwest::StatusCode;
//! use tonicpow::api::ApiRequest;
//!
//! let request = ApiRequest::get("campaigns/list")
//!     .query("current_page", 1)
//!     .query("results_per_page", 20);
//! assert_eq!(request.expected_status(), StatusCode::OK);
//!
//! let create = ApiRequest::post("goals");
//! assert_eq!(create.expected_status(), StatusCode::CREATED);
//! ```

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::common::{ApiError, Result};

/// One API call, built before dispatch.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<String>,
    expected_status: StatusCode,
    session_token: Option<String>,
}

impl ApiRequest {
    /// Creates a request. `POST` expects `201 Created`, other verbs `200 OK`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let expected_status = if method == Method::POST {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        Self {
            method,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
            expected_status,
            session_token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends one path segment after `path`. The value is percent-encoded
    /// at dispatch, so `/`, `?` and `#` stay inside the segment.
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    /// Appends a query pair. Values are URL-encoded at dispatch.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends several query pairs.
    pub fn query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`](super::common::Error::Decode) if serialization fails.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Overrides the status treated as success.
    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.expected_status = status;
        self
    }

    /// Sends `token` as the session cookie instead of the client's credential
    /// session. Used for calls made on behalf of a user.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn path_segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn expected_status(&self) -> StatusCode {
        self.expected_status
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

/// Timing information for one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTrace {
    /// Wall time across all attempts and backoff sleeps.
    pub elapsed: Duration,
}

/// The raw result of a dispatched request.
#[derive(Debug, Clone)]
pub struct StandardResponse {
    /// HTTP status of the final attempt.
    pub status: StatusCode,
    /// Raw response body.
    pub body: Vec<u8>,
    /// Parsed error body when the status was not the expected one.
    pub error: Option<ApiError>,
    /// Present when request tracing is enabled.
    pub trace: Option<RequestTrace>,
}

impl StandardResponse {
    /// Body as UTF-8 text, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Snapshot of the most recent request made by a client.
///
/// Overwritten by every call; concurrent callers should prefer the
/// per-call [`StandardResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastRequest {
    pub method: String,
    pub url: String,
    pub post_data: String,
    pub status_code: u16,
    pub error: Option<ApiError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_status_defaults() {
        assert_eq!(ApiRequest::post("x").expected_status(), StatusCode::CREATED);
        assert_eq!(ApiRequest::put("x").expected_status(), StatusCode::OK);
        assert_eq!(ApiRequest::delete("x").expected_status(), StatusCode::OK);
        assert_eq!(
            ApiRequest::post("users/password/forgot")
                .expect_status(StatusCode::OK)
                .expected_status(),
            StatusCode::OK
        );
    }

    #[test]
    fn test_json_body() {
        #[derive(Serialize)]
        struct Body {
            id: u64,
        }
        let request = ApiRequest::put("goals").json(&Body { id: 13 }).unwrap();
        assert_eq!(request.body(), Some(r#"{"id":13}"#));
        assert!(ApiRequest::get("goals").body().is_none());
    }

    #[test]
    fn test_response_decoding() {
        let response = StandardResponse {
            status: StatusCode::OK,
            body: br#"{"id":23}"#.to_vec(),
            error: None,
            trace: None,
        };
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["id"], 23);
        assert_eq!(response.text(), r#"{"id":23}"#);
    }
}
