//
//  tonicpow
//  api/retry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Retry policy with exponential backoff.
//!
//! A request is retried when the transport fails or the server answers with
//! a 5xx status, up to `retry_count` extra attempts. Only idempotent verbs
//! (`GET`, `PUT`, `DELETE`) are retried unless the client opts in for `POST`.
//!
//! The retry loop itself is [`RetryTransientMiddleware`]; this module only
//! turns [`ClientOptions`] into its policy and strategy.

use reqwest::{Method, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{Jitter, RetryTransientMiddleware, Retryable, RetryableStrategy};

use crate::config::{BackoffOptions, ClientOptions};

/// How failed attempts are retried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Extra attempts after the first.
    pub retry_count: u32,
    /// Delay schedule between attempts.
    pub backoff: BackoffOptions,
    /// Also retry `POST` (and other non-idempotent verbs).
    pub retry_non_idempotent: bool,
}

impl RetryPolicy {
    pub fn from_options(options: &ClientOptions) -> Self {
        Self {
            retry_count: options.retry_count(),
            backoff: options.backoff(),
            retry_non_idempotent: options.retry_non_idempotent(),
        }
    }

    /// Number of attempts allowed for `method`.
    pub fn max_attempts(&self, method: &Method) -> u32 {
        if self.allows(method) {
            self.retry_count.saturating_add(1)
        } else {
            1
        }
    }

    /// Returns `true` if `method` may be retried.
    pub fn allows(&self, method: &Method) -> bool {
        self.retry_non_idempotent
            || matches!(*method, Method::GET | Method::PUT | Method::DELETE | Method::HEAD)
    }

    /// Returns `true` if a response with `status` should be retried.
    pub fn is_retryable_status(status: StatusCode) -> bool {
        status.is_server_error()
    }

    /// Backoff schedule for the retry middleware.
    ///
    /// A zero `jitter` disables jitter; any other value enables bounded
    /// jitter between `initial` and the computed delay.
    pub fn exponential_backoff(&self) -> ExponentialBackoff {
        let BackoffOptions {
            initial,
            max,
            factor,
            jitter,
        } = self.backoff;
        let jitter = if jitter.is_zero() {
            Jitter::None
        } else {
            Jitter::Bounded
        };
        ExponentialBackoff::builder()
            .retry_bounds(initial, max.max(initial))
            .base(factor.max(1.0).round() as u32)
            .jitter(jitter)
            .build_with_max_retries(self.retry_count)
    }

    /// Wraps `http` with the retry middleware.
    pub fn client(&self, http: reqwest::Client) -> ClientWithMiddleware {
        ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                self.exponential_backoff(),
                ServerErrors,
            ))
            .build()
    }
}

/// Retries transport failures and 5xx responses; everything else is final.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerErrors;

impl RetryableStrategy for ServerErrors {
    fn handle(&self, res: &Result<Response, reqwest_middleware::Error>) -> Option<Retryable> {
        match res {
            Ok(response) if RetryPolicy::is_retryable_status(response.status()) => {
                Some(Retryable::Transient)
            }
            Ok(_) => None,
            Err(_) => Some(Retryable::Transient),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::from_options(&ClientOptions::default())
    }

    #[test]
    fn test_idempotent_methods_only() {
        let policy = policy();
        assert_eq!(policy.max_attempts(&Method::GET), 3);
        assert_eq!(policy.max_attempts(&Method::PUT), 3);
        assert_eq!(policy.max_attempts(&Method::DELETE), 3);
        assert_eq!(policy.max_attempts(&Method::POST), 1);

        let opted_in = RetryPolicy {
            retry_non_idempotent: true,
            ..policy
        };
        assert_eq!(opted_in.max_attempts(&Method::POST), 3);
    }

    #[test]
    fn test_max_attempts_saturates() {
        let policy =
            RetryPolicy::from_options(&ClientOptions::default().with_retry_count(u32::MAX));
        assert_eq!(policy.max_attempts(&Method::GET), u32::MAX);
        assert_eq!(policy.max_attempts(&Method::POST), 1);
    }

    #[test]
    fn test_backoff_schedule() {
        let backoff = policy().exponential_backoff();
        assert_eq!(backoff.max_n_retries, Some(2));
        assert_eq!(backoff.min_retry_interval, std::time::Duration::from_millis(2));
        assert_eq!(backoff.max_retry_interval, std::time::Duration::from_millis(10));
        assert_eq!(backoff.base, 2);
    }

    #[test]
    fn test_retryable_status() {
        assert!(RetryPolicy::is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(!RetryPolicy::is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!RetryPolicy::is_retryable_status(StatusCode::CREATED));
    }
}
