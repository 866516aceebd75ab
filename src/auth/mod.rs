//
//  tonicpow
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! The TonicPow API accepts two kinds of credentials:
//!
//! - **API key**: sent on every request in the `api_key` header.
//! - **Session**: the API key is exchanged once for a session token, which
//!   is then sent as the `session_token` cookie. The server may rotate the
//!   token with a `Set-Cookie` header on any response.
//!
//! ## Module Structure
//!
//! - [`session`]: the session token slot and `Set-Cookie` handling
//!
//! ## Example
//!
//! ```rust
//! use tonicpow::auth::AuthCredential;
//!
//! let credential = AuthCredential::api_key("your-api-key");
//! assert!(!credential.is_session());
//! assert_eq!(credential.key(), "your-api-key");
//! ```

pub mod session;

pub use session::*;

use reqwest::header::COOKIE;
use reqwest::RequestBuilder;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "api_key";

/// Credential attached to outgoing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Send the key in the `api_key` header.
    ApiKey {
        /// The application API key.
        api_key: String,
    },
    /// Send the session cookie; the key is only used to open the session.
    Session {
        /// The application API key exchanged for a session.
        api_key: String,
    },
}

impl AuthCredential {
    pub fn api_key(api_key: impl Into<String>) -> Self {
        Self::ApiKey {
            api_key: api_key.into(),
        }
    }

    pub fn session(api_key: impl Into<String>) -> Self {
        Self::Session {
            api_key: api_key.into(),
        }
    }

    /// The underlying API key.
    pub fn key(&self) -> &str {
        match self {
            Self::ApiKey { api_key } | Self::Session { api_key } => api_key,
        }
    }

    pub fn is_session(&self) -> bool {
        matches!(self, Self::Session { .. })
    }

    /// Applies the credential to an HTTP request.
    ///
    /// # Parameters
    ///
    /// - `request`: the request to authenticate
    /// - `session_token`: the current session token, used in session mode
    ///
    /// # Notes
    ///
    /// In session mode with no token yet (before a session is created) the
    /// request is sent unauthenticated.
    pub fn apply_to_request(
        &self,
        request: RequestBuilder,
        session_token: Option<&str>,
    ) -> RequestBuilder {
        match self {
            Self::ApiKey { api_key } => request.header(API_KEY_HEADER, api_key),
            Self::Session { .. } => match session_token {
                Some(token) => request.header(COOKIE, session_cookie(token)),
                None => request,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of(request: RequestBuilder, name: &str) -> Option<String> {
        let built = request.build().unwrap();
        built
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_api_key_header() {
        let client = reqwest::Client::new();
        let credential = AuthCredential::api_key("secret");
        let request = credential.apply_to_request(client.get("http://localhost/x"), Some("tok"));
        assert_eq!(header_of(request, API_KEY_HEADER).as_deref(), Some("secret"));
    }

    #[test]
    fn test_session_cookie() {
        let client = reqwest::Client::new();
        let credential = AuthCredential::session("secret");

        let request = credential.apply_to_request(client.get("http://localhost/x"), Some("tok"));
        assert_eq!(header_of(request, "cookie").as_deref(), Some("session_token=tok"));

        let request = credential.apply_to_request(client.get("http://localhost/x"), None);
        assert_eq!(header_of(request, "cookie"), None);
    }
}
