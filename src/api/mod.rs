//
//  tonicpow
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the TonicPow REST API and the
//! typed operations built on top of it.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication, retries and the generic dispatcher
//! - [`request`]: Request and response envelopes
//! - [`retry`]: Backoff schedule for transient failures
//! - [`resources`]: Resource models and service traits (campaigns, goals, users, ...)
//! - [`common`]: Shared types (errors, pagination, sorting)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tonicpow::api::TonicPowClient;
//! use tonicpow::config::ClientOptions;
//! use tonicpow::prelude::*;
//!
//! # async fn example() -> tonicpow::Result<()> {
//! let client = TonicPowClient::new(
//!     ClientOptions::new()
//!         .with_api_key("your-api-key")
//!         .with_environment_str("staging"),
//! )?;
//!
//! let goal = client.get_goal(13).await?;
//! println!("{}: {}", goal.name, goal.payout_rate);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result`], whose [`Error`] separates local
//! validation failures (no request made) from API errors, transport errors
//! and undecodable bodies.

/// Core HTTP client and generic request dispatcher.
pub mod client;

/// Shared types: errors, pagination and sort options.
pub mod common;

/// Request and response envelopes.
pub mod request;

/// Retry policy with exponential backoff.
pub mod retry;

/// TonicPow resources and their operations.
pub mod resources;

pub use client::TonicPowClient;
pub use common::{
    ApiError, Error, ListOptions, PageResults, Result, SortOrder, APP_SORT_FIELDS,
    CAMPAIGN_SORT_FIELDS, REFERRAL_SORT_FIELDS,
};
pub use request::{ApiRequest, LastRequest, RequestTrace, StandardResponse};
pub use resources::*;
pub use retry::RetryPolicy;
