//
//  tonicpow
//  auth/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Session token storage.
//!
//! A client in session mode keeps exactly one token. Every response is
//! checked for a `Set-Cookie: session_token=...` header; a new value replaces
//! the stored token and an empty or expired cookie (`Max-Age` or `Expires`
//! in the past) clears it. Headers are parsed with the `cookie` crate.

use std::sync::RwLock;

use cookie::Cookie;
use reqwest::header::{HeaderMap, SET_COOKIE};
use time::OffsetDateTime;

/// Cookie name carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Formats the `Cookie` header value for a token.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}")
}

/// Outcome of inspecting one `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The server issued a new token.
    Rotated(String),
    /// The server expired the session.
    Cleared,
}

/// Parses a `Set-Cookie` value.
///
/// Returns `None` when the cookie is not the session cookie.
///
/// ```rust
/// use tonicpow::auth::{parse_set_cookie, SessionUpdate};
///
/// assert_eq!(
///     parse_set_cookie("session_token=abc; Path=/; HttpOnly"),
///     Some(SessionUpdate::Rotated("abc".to_string()))
/// );
/// assert_eq!(
///     parse_set_cookie("session_token=abc; Max-Age=0"),
///     Some(SessionUpdate::Cleared)
/// );
/// assert_eq!(parse_set_cookie("other=1"), None);
/// ```
pub fn parse_set_cookie(value: &str) -> Option<SessionUpdate> {
    let cookie = Cookie::parse(value).ok()?;
    if cookie.name() != SESSION_COOKIE {
        return None;
    }

    let token = cookie.value().trim_matches('"');
    let max_age_elapsed = cookie
        .max_age()
        .is_some_and(|age| age <= time::Duration::ZERO);
    let expires_elapsed = cookie
        .expires_datetime()
        .is_some_and(|at| at <= OffsetDateTime::now_utc());

    if token.is_empty() || max_age_elapsed || expires_elapsed {
        Some(SessionUpdate::Cleared)
    } else {
        Some(SessionUpdate::Rotated(token.to_string()))
    }
}

/// Thread-safe single slot for the current session token.
///
/// Last writer wins.
#[derive(Debug, Default)]
pub struct SessionStore {
    token: RwLock<Option<String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current token.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.into());
    }

    pub fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// Applies every session `Set-Cookie` header in `headers`.
    ///
    /// Returns the last update applied, if any.
    pub fn update_from_headers(&self, headers: &HeaderMap) -> Option<SessionUpdate> {
        let mut last = None;
        for value in headers.get_all(SET_COOKIE) {
            let Some(update) = value.to_str().ok().and_then(parse_set_cookie) else {
                continue;
            };
            match &update {
                SessionUpdate::Rotated(token) => self.set(token.clone()),
                SessionUpdate::Cleared => self.clear(),
            }
            last = Some(update);
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_variants() {
        assert_eq!(parse_set_cookie("session_token=; Path=/"), Some(SessionUpdate::Cleared));
        assert_eq!(
            parse_set_cookie("session_token=\"quoted\""),
            Some(SessionUpdate::Rotated("quoted".into()))
        );
        assert_eq!(
            parse_set_cookie("session_token=abc; max-age=3600"),
            Some(SessionUpdate::Rotated("abc".into()))
        );
        assert_eq!(parse_set_cookie("garbage"), None);
    }

    #[test]
    fn test_expires_attribute() {
        assert_eq!(
            parse_set_cookie("session_token=deleted; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT"),
            Some(SessionUpdate::Cleared)
        );
        assert_eq!(
            parse_set_cookie("session_token=abc; Path=/; Expires=Fri, 31 Dec 2100 23:59:59 GMT"),
            Some(SessionUpdate::Rotated("abc".into()))
        );
    }

    #[test]
    fn test_store_updates_from_headers() {
        let store = SessionStore::new();
        assert_eq!(store.token(), None);

        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("tracking=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("session_token=new-token; HttpOnly"));
        assert_eq!(
            store.update_from_headers(&headers),
            Some(SessionUpdate::Rotated("new-token".into()))
        );
        assert_eq!(store.token().as_deref(), Some("new-token"));

        let mut expire = HeaderMap::new();
        expire.append(SET_COOKIE, HeaderValue::from_static("session_token=x; Max-Age=0"));
        store.update_from_headers(&expire);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_unrelated_headers_leave_token() {
        let store = SessionStore::new();
        store.set("keep");
        assert_eq!(store.update_from_headers(&HeaderMap::new()), None);
        assert_eq!(store.token().as_deref(), Some("keep"));
    }
}
