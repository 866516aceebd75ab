//
//  tonicpow
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the TonicPow API
//!
//! [`TonicPowClient`] owns the HTTP connection pool and the generic request
//! dispatcher used by every resource operation.
//!
//! ## Features
//!
//! - Environment selection (live, staging, development or custom)
//! - API key header or session cookie authentication
//! - JSON request bodies and URL-encoded query strings
//! - Retry with exponential backoff for transient failures
//! - Mapping of unexpected statuses to [`ApiError`]
//! - A snapshot of the last request for debugging

use std::sync::Mutex;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::{Client, StatusCode};
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::common::{parse_api_error, ApiError, Error, Result};
use super::request::{ApiRequest, LastRequest, RequestTrace, StandardResponse};
use super::retry::RetryPolicy;
use crate::auth::{session_cookie, AuthCredential, SessionStore, SessionUpdate};
use crate::config::{ClientOptions, Environment};

/// The main client for the TonicPow API.
///
/// Resource operations are grouped into service traits
/// ([`CampaignService`](super::CampaignService),
/// [`GoalService`](super::GoalService), ...) that this type implements.
/// Bring them into scope with `use tonicpow::prelude::*;`.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use tonicpow::api::TonicPowClient;
/// use tonicpow::config::ClientOptions;
///
/// let client = TonicPowClient::new(
///     ClientOptions::new()
///         .with_api_key("your-api-key")
///         .with_environment_str("staging"),
/// )?;
/// # Ok::<(), tonicpow::Error>(())
/// ```
///
/// # Concurrency
///
/// The client is `Send + Sync` and can be shared behind an `Arc`. The
/// session token and the [`last_request`](Self::last_request) snapshot are
/// single slots guarded by locks; the last writer wins.
#[derive(Debug)]
pub struct TonicPowClient {
    /// The underlying HTTP client, used directly for verbs that are not retried
    http: Client,
    /// `http` behind the retry middleware
    retrying: ClientWithMiddleware,
    /// Options the client was built from
    options: ClientOptions,
    /// Credential applied to each request
    auth: AuthCredential,
    /// Validated custom headers
    headers: HeaderMap,
    /// Retry schedule
    retry: RetryPolicy,
    /// Session token slot (session mode)
    session: SessionStore,
    /// Snapshot of the most recent request
    last_request: Mutex<Option<LastRequest>>,
}

impl TonicPowClient {
    /// Creates a client from options.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when no API key is set or a custom header is
    /// invalid; [`Error::Transport`] when the HTTP client cannot be built.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let api_key = options
            .api_key()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Configuration("an API key is required".to_string()))?;

        let auth = if options.session_auth() {
            AuthCredential::session(api_key)
        } else {
            AuthCredential::api_key(api_key)
        };

        let headers = build_headers(options.custom_headers())?;
        let transport = options.transport();
        let user_agent = HeaderValue::from_str(options.user_agent())
            .map_err(|_| Error::Configuration("user agent is not a valid header value".into()))?;

        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(options.timeout())
            .connect_timeout(transport.connect_timeout)
            .tcp_keepalive(transport.keep_alive)
            .pool_idle_timeout(transport.idle_timeout)
            .pool_max_idle_per_host(transport.max_idle_connections)
            .build()?;

        let retry = RetryPolicy::from_options(&options);
        Ok(Self {
            retrying: retry.client(http.clone()),
            http,
            retry,
            options,
            auth,
            headers,
            session: SessionStore::new(),
            last_request: Mutex::new(None),
        })
    }

    /// Creates a live-environment client with default options.
    ///
    /// ```rust,no_run
    /// use tonicpow::api::TonicPowClient;
    ///
    /// let client = TonicPowClient::with_api_key("your-api-key")?;
    /// assert_eq!(client.environment().name(), "live");
    /// # Ok::<(), tonicpow::Error>(())
    /// ```
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientOptions::new().with_api_key(api_key))
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn environment(&self) -> &Environment {
        self.options.environment()
    }

    pub fn credential(&self) -> &AuthCredential {
        &self.auth
    }

    /// Current session token, if a session is open.
    pub fn session_token(&self) -> Option<String> {
        self.session.token()
    }

    /// Replaces the session token, e.g. one restored from storage.
    pub fn set_session_token(&self, token: impl Into<String>) {
        self.session.set(token);
    }

    pub(crate) fn clear_session_token(&self) {
        self.session.clear();
    }

    /// Snapshot of the most recent request made by this client.
    pub fn last_request(&self) -> Option<LastRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Builds the absolute URL for a request.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let raw = self.environment().url_for(request.path());
        let mut url = Url::parse(&raw)
            .map_err(|e| Error::Configuration(format!("invalid request URL {raw}: {e}")))?;
        if !request.path_segments().is_empty() {
            url.path_segments_mut()
                .map_err(|_| Error::Configuration(format!("base URL cannot take a path: {raw}")))?
                .pop_if_empty()
                .extend(request.path_segments());
        }
        if !request.query_params().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query_params());
        }
        Ok(url)
    }

    /// Sends a request without checking its status.
    ///
    /// Transient failures are retried according to the client's policy. The
    /// response's `error` is filled in when the status differs from the
    /// expected one and the body parses as an error object.
    ///
    /// # Errors
    ///
    /// Only transport failures and URL problems; any HTTP status is returned
    /// as a response.
    pub async fn send(&self, request: &ApiRequest) -> Result<StandardResponse> {
        let url = self.url_for(request)?;
        let method = request.method().clone();
        let started = Instant::now();

        let outcome = match self.prepare(request, url.clone()).build() {
            Ok(built) if self.retry.allows(&method) => self.retrying.execute(built).await,
            Ok(built) => self.http.execute(built).await.map_err(Into::into),
            Err(e) => Err(e.into()),
        };

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                self.record(request, &url, 0, None);
                return Err(Error::Transport(e));
            }
        };

        let status = response.status();
        if self.auth.is_session() && request.session_token().is_none() {
            match self.session.update_from_headers(response.headers()) {
                Some(SessionUpdate::Rotated(_)) => debug!("session token rotated"),
                Some(SessionUpdate::Cleared) => debug!("session token cleared"),
                None => {}
            }
        }

        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                self.record(request, &url, status.as_u16(), None);
                return Err(e.into());
            }
        };

        let error = if status == request.expected_status() {
            None
        } else {
            parse_api_error(status, &body).ok()
        };
        self.record(request, &url, status.as_u16(), error.clone());

        debug!(
            %method, %url, status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );

        let trace = self.options.request_tracing().then(|| RequestTrace {
            elapsed: started.elapsed(),
        });

        Ok(StandardResponse {
            status,
            body,
            error,
            trace,
        })
    }

    /// Sends a request and requires the expected status.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] when the status differs from the expected one (even if
    /// the body is a valid success payload), [`Error::Decode`] when that
    /// error body is not JSON, and [`Error::Transport`] on network failure.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use tonicpow::api::{ApiRequest, TonicPowClient};
    ///
    /// # async fn example() -> tonicpow::Result<()> {
    /// let client = TonicPowClient::with_api_key("your-api-key")?;
    /// let response = client.request(ApiRequest::get("campaigns/statistics")).await?;
    /// println!("{}", response.text());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request(&self, request: ApiRequest) -> Result<StandardResponse> {
        let response = self.send(&request).await?;
        if response.status == request.expected_status() {
            return Ok(response);
        }
        match response.error {
            Some(error) => Err(Error::Api(Box::new(error))),
            None => Err(parse_api_error(response.status, &response.body)
                .map_or_else(Error::Decode, |api| Error::Api(Box::new(api)))),
        }
    }

    /// Sends a request and decodes the JSON body.
    pub async fn request_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.request(request).await?.json()
    }

    /// Sends a request whose success body is ignored.
    pub async fn request_empty(&self, request: ApiRequest) -> Result<()> {
        self.request(request).await.map(|_| ())
    }

    fn prepare(&self, request: &ApiRequest, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(request.method().clone(), url)
            .headers(self.headers.clone());

        builder = match request.session_token() {
            Some(token) if self.auth.is_session() => {
                builder.header(COOKIE, session_cookie(token))
            }
            Some(token) => self
                .auth
                .apply_to_request(builder, None)
                .header(COOKIE, session_cookie(token)),
            None => self
                .auth
                .apply_to_request(builder, self.session.token().as_deref()),
        };

        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }
        builder
    }

    fn record(&self, request: &ApiRequest, url: &Url, status_code: u16, error: Option<ApiError>) {
        let snapshot = LastRequest {
            method: request.method().to_string(),
            url: url.to_string(),
            post_data: request.body().unwrap_or_default().to_string(),
            status_code,
            error,
        };
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(snapshot);
    }
}

/// Validates custom headers into a [`HeaderMap`], keeping repeated names.
fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::Configuration(format!("invalid header name: {name}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::Configuration(format!("invalid value for header {name}")))?;
        map.append(name, value);
    }
    Ok(map)
}
