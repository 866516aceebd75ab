//
//  tonicpow
//  config/options.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Options
//!
//! Connection settings used to build a [`TonicPowClient`](crate::api::TonicPowClient).
//! Options are assembled once with the `with_*` builder methods and are
//! immutable for the lifetime of the client.
//!
//! ## Defaults
//!
//! | Setting | Default |
//! |---------|---------|
//! | environment | `live` |
//! | request timeout | 10 s |
//! | retry count | 2 |
//! | backoff | initial 2 ms, max 10 ms, factor 2.0, jitter 2 ms |
//! | connect timeout | 5 s |
//! | TCP keep-alive | 20 s |
//! | idle connection timeout | 20 s |
//! | max idle connections per host | 10 |
//! | user agent | `tonicpow-rs: v<crate version>` |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use tonicpow::config::ClientOptions;
//!
//! let options = ClientOptions::new()
//!     .with_api_key("your-api-key")
//!     .with_environment_str("staging")
//!     .with_timeout(Duration::from_secs(30))
//!     .with_retry_count(3);
//!
//! assert_eq!(options.environment().name(), "staging");
//! assert_eq!(options.retry_count(), 3);
//! ```

use std::time::Duration;

use super::Environment;

/// Exponential backoff parameters applied between retry attempts.
///
/// The delay before retry `n` (zero based) grows as `initial * factor^n`,
/// capped at `max`. A non-zero `jitter` randomizes each delay within those
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffOptions {
    /// Delay before the first retry.
    pub initial: Duration,
    /// Upper bound for the exponential component.
    pub max: Duration,
    /// Growth factor between attempts.
    pub factor: f64,
    /// Zero disables jitter.
    pub jitter: Duration,
}

impl Default for BackoffOptions {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(2),
            max: Duration::from_millis(10),
            factor: 2.0,
            jitter: Duration::from_millis(2),
        }
    }
}

/// Low-level connection tuning passed to the HTTP transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    /// Time allowed to establish a TCP/TLS connection.
    pub connect_timeout: Duration,
    /// TCP keep-alive interval.
    pub keep_alive: Duration,
    /// How long an idle pooled connection is kept open.
    pub idle_timeout: Duration,
    /// Maximum idle connections kept per host.
    pub max_idle_connections: usize,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            keep_alive: Duration::from_secs(20),
            idle_timeout: Duration::from_secs(20),
            max_idle_connections: 10,
        }
    }
}

/// Returns the user agent sent when none is configured.
pub fn default_user_agent() -> String {
    format!("tonicpow-rs: v{}", crate::VERSION)
}

/// Builder-style configuration for the API client.
///
/// See the [module documentation](self) for defaults.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    api_key: Option<String>,
    environment: Environment,
    custom_headers: Vec<(String, String)>,
    timeout: Duration,
    retry_count: u32,
    backoff: BackoffOptions,
    transport: TransportOptions,
    user_agent: String,
    request_tracing: bool,
    session_auth: bool,
    retry_non_idempotent: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            environment: Environment::live(),
            custom_headers: Vec::new(),
            timeout: Duration::from_secs(10),
            retry_count: 2,
            backoff: BackoffOptions::default(),
            transport: TransportOptions::default(),
            user_agent: default_user_agent(),
            request_tracing: false,
            session_auth: false,
            retry_non_idempotent: false,
        }
    }
}

impl ClientOptions {
    /// Creates options populated with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key used to authenticate every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Selects the target environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Selects the target environment by name or alias.
    ///
    /// Unknown names resolve to `live`; see [`Environment::from_name`].
    pub fn with_environment_str(self, name: &str) -> Self {
        self.with_environment(Environment::from_name(name))
    }

    /// Targets an arbitrary base URL.
    pub fn with_custom_environment(
        self,
        name: impl Into<String>,
        alias: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        self.with_environment(Environment::custom(name, alias, api_url))
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how many times a failed request is retried. Zero disables retries.
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Replaces the backoff parameters.
    pub fn with_backoff(mut self, backoff: BackoffOptions) -> Self {
        self.backoff = backoff;
        self
    }

    /// Replaces the transport tuning.
    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds headers sent with every request.
    ///
    /// A name may appear more than once; every value is sent.
    pub fn with_custom_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attaches timing information to every [`StandardResponse`](crate::api::StandardResponse).
    pub fn with_request_tracing(mut self) -> Self {
        self.request_tracing = true;
        self
    }

    /// Authenticates with a session cookie instead of the `api_key` header.
    ///
    /// A session must be created with
    /// [`SessionService::create_session`](crate::api::SessionService::create_session)
    /// before other calls succeed.
    pub fn with_session_auth(mut self) -> Self {
        self.session_auth = true;
        self
    }

    /// Allows `POST` requests to be retried.
    ///
    /// Creating resources is not idempotent, so a retried `POST` may create
    /// duplicates when the first attempt reached the server.
    pub fn with_retry_non_idempotent(mut self) -> Self {
        self.retry_non_idempotent = true;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn custom_headers(&self) -> &[(String, String)] {
        &self.custom_headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn backoff(&self) -> BackoffOptions {
        self.backoff
    }

    pub fn transport(&self) -> TransportOptions {
        self.transport
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn request_tracing(&self) -> bool {
        self.request_tracing
    }

    pub fn session_auth(&self) -> bool {
        self.session_auth
    }

    pub fn retry_non_idempotent(&self) -> bool {
        self.retry_non_idempotent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.environment(), &Environment::live());
        assert_eq!(options.timeout(), Duration::from_secs(10));
        assert_eq!(options.retry_count(), 2);
        assert_eq!(options.backoff().initial, Duration::from_millis(2));
        assert_eq!(options.backoff().max, Duration::from_millis(10));
        assert_eq!(options.transport().max_idle_connections, 10);
        assert!(options.user_agent().starts_with("tonicpow-rs: v"));
        assert!(options.api_key().is_none());
        assert!(!options.session_auth());
        assert!(!options.retry_non_idempotent());
    }

    #[test]
    fn test_builder_chain() {
        let options = ClientOptions::new()
            .with_api_key("key")
            .with_environment_str("local")
            .with_user_agent("agent")
            .with_custom_headers([("x-one", "1"), ("x-one", "2")])
            .with_request_tracing()
            .with_session_auth();

        assert_eq!(options.api_key(), Some("key"));
        assert_eq!(options.environment(), &Environment::development());
        assert_eq!(options.user_agent(), "agent");
        assert_eq!(options.custom_headers().len(), 2);
        assert!(options.request_tracing());
        assert!(options.session_auth());
    }

    #[test]
    fn test_custom_environment() {
        let options = ClientOptions::new().with_custom_environment("mock", "m", "http://x/v1");
        assert_eq!(options.environment().name(), "mock");
        assert_eq!(options.environment().api_url(), "http://x/v1");
    }
}
