//
//  tonicpow
//  api/resources/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! API session lifecycle.
//!
//! In session mode the API key is exchanged for a `session_token` cookie
//! with [`SessionService::create_session`]. The token is then sent on every
//! request and rotated whenever the server issues a new one.
//!
//! # Example
//!
//! ```rust,no_run
//! use tonicpow::api::TonicPowClient;
//! use tonicpow::config::ClientOptions;
//! use tonicpow::prelude::*;
//!
//! # async fn example() -> tonicpow::Result<()> {
//! let client = TonicPowClient::new(
//!     ClientOptions::new().with_api_key("your-api-key").with_session_auth(),
//! )?;
//! client.create_session().await?;
//! // ... make calls ...
//! client.end_session(None).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::Serialize;

use crate::api::client::TonicPowClient;
use crate::api::common::Result;
use crate::api::request::ApiRequest;

const MODEL: &str = "auth/session";

#[derive(Serialize)]
struct SessionRequest<'a> {
    api_key: &'a str,
}

/// Session endpoints.
#[async_trait]
pub trait SessionService {
    /// Opens a session for the client's API key (`POST auth/session`, 201).
    ///
    /// In session mode the returned cookie becomes the client's token.
    async fn create_session(&self) -> Result<()>;

    /// Keeps a session alive (`GET auth/session`).
    ///
    /// `custom_token` targets another session (e.g. a user's); `None` uses
    /// the client's own session.
    async fn prolong_session(&self, custom_token: Option<&str>) -> Result<()>;

    /// Ends a session (`DELETE auth/session`).
    ///
    /// Ending the client's own session also clears the stored token.
    async fn end_session(&self, custom_token: Option<&str>) -> Result<()>;
}

fn with_custom_token(request: ApiRequest, custom_token: Option<&str>) -> ApiRequest {
    match custom_token.filter(|token| !token.is_empty()) {
        Some(token) => request.with_session_token(token),
        None => request,
    }
}

#[async_trait]
impl SessionService for TonicPowClient {
    async fn create_session(&self) -> Result<()> {
        let body = SessionRequest {
            api_key: self.credential().key(),
        };
        self.request_empty(ApiRequest::post(MODEL).json(&body)?)
            .await
    }

    async fn prolong_session(&self, custom_token: Option<&str>) -> Result<()> {
        self.request_empty(with_custom_token(ApiRequest::get(MODEL), custom_token))
            .await
    }

    async fn end_session(&self, custom_token: Option<&str>) -> Result<()> {
        let own_session = custom_token.map_or(true, str::is_empty);
        self.request_empty(with_custom_token(ApiRequest::delete(MODEL), custom_token))
            .await?;
        if own_session {
            self.clear_session_token();
        }
        Ok(())
    }
}
