//
//  tonicpow
//  config/environment.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! API environment selection.
//!
//! Every request is issued against exactly one environment. The environment
//! decides the base URL (including the versioned path prefix) that relative
//! resource paths are appended to.
//!
//! | Name | Alias | API URL |
//! |------|-------|---------|
//! | `live` | `production` | `https://api.tonicpow.com/v1` |
//! | `staging` | `beta` | `https://api.staging.tonicpow.com/v1` |
//! | `development` | `local` | `http://localhost:3000/v1` |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current version prefix for every endpoint.
pub const API_VERSION: &str = "v1";

const LIVE_NAME: &str = "live";
const LIVE_ALIAS: &str = "production";
const LIVE_URL: &str = "https://api.tonicpow.com/v1";

const STAGING_NAME: &str = "staging";
const STAGING_ALIAS: &str = "beta";
const STAGING_URL: &str = "https://api.staging.tonicpow.com/v1";

const DEVELOPMENT_NAME: &str = "development";
const DEVELOPMENT_ALIAS: &str = "local";
const DEVELOPMENT_URL: &str = "http://localhost:3000/v1";

/// A named API environment.
///
/// The three built-in environments are available through [`Environment::live`],
/// [`Environment::staging`] and [`Environment::development`]. Anything else
/// (a mock server in tests, a self-hosted instance) can be described with
/// [`Environment::custom`].
///
/// # Example
///
/// ```rust
/// use tonicpow::config::Environment;
///
/// let env = Environment::from_name("beta");
/// assert_eq!(env, Environment::staging());
/// assert_eq!(env.api_url(), "https://api.staging.tonicpow.com/v1");
///
/// // Unknown names fall back to live
/// assert_eq!(Environment::from_name("nope"), Environment::live());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Canonical name (e.g. `live`).
    name: String,
    /// Secondary name accepted when parsing (e.g. `production`).
    alias: String,
    /// Base URL without a trailing slash.
    api_url: String,
}

impl Environment {
    /// The production environment.
    pub fn live() -> Self {
        Self::custom(LIVE_NAME, LIVE_ALIAS, LIVE_URL)
    }

    /// The production-like staging environment.
    pub fn staging() -> Self {
        Self::custom(STAGING_NAME, STAGING_ALIAS, STAGING_URL)
    }

    /// A locally running API instance.
    pub fn development() -> Self {
        Self::custom(DEVELOPMENT_NAME, DEVELOPMENT_ALIAS, DEVELOPMENT_URL)
    }

    /// Describes an arbitrary environment.
    ///
    /// A trailing slash on `api_url` is stripped so that paths can always be
    /// joined with a single `/`.
    pub fn custom(
        name: impl Into<String>,
        alias: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        let api_url = api_url.into();
        Self {
            name: name.into(),
            alias: alias.into(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves an environment by name or alias.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. An
    /// empty or unrecognized value resolves to [`Environment::live`].
    pub fn from_name(value: &str) -> Self {
        let value = value.trim().to_lowercase();
        match value.as_str() {
            STAGING_NAME | STAGING_ALIAS => Self::staging(),
            DEVELOPMENT_NAME | DEVELOPMENT_ALIAS => Self::development(),
            _ => Self::live(),
        }
    }

    /// Canonical environment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alias accepted by [`Environment::from_name`].
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Base URL, including the version prefix, without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Joins a relative resource path onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::live()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
