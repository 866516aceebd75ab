//
//  tonicpow
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TonicPow API Client
//!
//! A typed, async client for the TonicPow advertising API, plus the small
//! `tpow` command-line tool built on it.
//!
//! ## Overview
//!
//! Advertisers fund campaigns, define goals and receive conversions;
//! promoters create tracking links and earn payouts. This crate covers the
//! REST surface for all of it: users, advertiser profiles, apps, campaigns,
//! goals, links, conversions, widgets, visitor sessions and rates.
//!
//! ## Features
//!
//! - **Environments**: live, staging, development or a custom base URL
//! - **Authentication**: `api_key` header or a rotating session cookie
//! - **Local validation**: missing fields and bad sort fields fail before any request
//! - **Retries**: exponential backoff with jitter for transient failures
//! - **Diagnostics**: per-call traces and a last-request snapshot
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client, request dispatcher and resource services
//! - [`auth`]: Credentials and session cookie handling
//! - [`config`]: Client options, environments and the config file
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Table and JSON output for the CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tonicpow::prelude::*;
//!
//! # async fn example() -> tonicpow::Result<()> {
//! let client = TonicPowClient::new(
//!     ClientOptions::new()
//!         .with_api_key("your-api-key")
//!         .with_environment(Environment::staging()),
//! )?;
//!
//! let campaign = client.get_campaign(23).await?;
//! println!("{} has {} satoshis", campaign.title, campaign.balance_satoshis);
//!
//! match client.create_campaign(&Campaign::default()).await {
//!     Err(Error::MissingField(field)) => println!("missing {field}"),
//!     other => println!("{other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains the `tpow` commands, arguments and subcommands defined using the
/// clap derive API.
pub mod cli;

/// The TonicPow API client.
///
/// Handles authentication, request building, retries, pagination and error
/// mapping, and exposes one service trait per resource.
pub mod api;

/// Credentials and API session handling.
pub mod auth;

/// Client options and configuration file management.
///
/// The CLI's configuration is stored in platform-specific locations:
/// - Linux: `~/.config/tonicpow/config.toml`
/// - macOS: `~/Library/Application Support/com.tonicpow.tonicpow/config.toml`
/// - Windows: `%APPDATA%\tonicpow\tonicpow\config\config.toml`
pub mod config;

/// Output formatting for the CLI (tables and JSON).
pub mod output;

pub use api::common::{Error, Result};
pub use api::TonicPowClient;
pub use cli::Cli;
pub use config::{ClientOptions, Config, Environment};

/// Everything needed to call the API: the client, its options, the models
/// and the service traits that carry the operations.
///
/// ```rust
/// use tonicpow::prelude::*;
///
/// let options = ClientOptions::new().with_api_key("key");
/// assert_eq!(options.environment(), &Environment::live());
/// ```
pub mod prelude {
    pub use crate::api::resources::*;
    pub use crate::api::{
        ApiError, ApiRequest, Error, ListOptions, PageResults, Result, SortOrder,
        StandardResponse, TonicPowClient,
    };
    pub use crate::config::{BackoffOptions, ClientOptions, Environment, TransportOptions};
}

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes.
pub const APP_NAME: &str = "tpow";

/// Library version, derived from Cargo.toml at compile time.
///
/// ```rust
/// use tonicpow::VERSION;
///
/// println!("tonicpow {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// The command completed without errors.
    pub const SUCCESS: i32 = 0;

    /// An unspecified error occurred. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid arguments, or a field required by the API was missing.
    pub const USAGE: i32 = 2;

    /// No API key configured, or the API rejected it.
    ///
    /// Set `TONICPOW_API_KEY` or run `tpow config set api_key <key>`.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The API could not be reached or failed with a server error.
    pub const SERVICE_ERROR: i32 = 32;
}
