//
//  tonicpow
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! TonicPow resource models and their operations.
//!
//! Every resource follows the same template:
//!
//! 1. validate required fields locally (no network call on failure)
//! 2. clear server-managed fields before an update
//! 3. build the path and query
//! 4. dispatch with the verb and expected status (201 create, 200 otherwise)
//! 5. decode the JSON body
//!
//! The shared steps live in the [`Resource`] trait and the generic
//! `create_resource` / `get_resource` / `update_resource` helpers; each
//! submodule adds its model and a service trait implemented by
//! [`TonicPowClient`].
//!
//! # Module Organization
//!
//! - [`session`] - API session lifecycle
//! - [`users`] - user accounts, passwords, balances, referrals
//! - [`advertisers`] - advertiser profiles
//! - [`apps`] - advertiser apps
//! - [`campaigns`] - campaigns, feeds and statistics
//! - [`goals`] - campaign goals
//! - [`links`] - tracking links
//! - [`conversions`] - goal conversions
//! - [`widgets`] - embeddable widgets
//! - [`visitors`] - visitor sessions
//! - [`rates`] - currency rates

pub mod advertisers;
pub mod apps;
pub mod campaigns;
pub mod conversions;
pub mod goals;
pub mod links;
pub mod rates;
pub mod session;
pub mod users;
pub mod visitors;
pub mod widgets;

pub use advertisers::*;
pub use apps::*;
pub use campaigns::*;
pub use conversions::*;
pub use goals::*;
pub use links::*;
pub use rates::*;
pub use session::*;
pub use users::*;
pub use visitors::*;
pub use widgets::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::TonicPowClient;
use super::common::{Error, Result};
use super::request::ApiRequest;

/// Serde helper: skip zero and empty values when serializing.
pub(crate) fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Describes a CRUD resource to the generic helpers.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Path segment of the resource (e.g. `campaigns`).
    const MODEL: &'static str;

    /// Primary key; zero means "not yet created".
    fn id(&self) -> u64;

    /// Checks fields required to create the resource.
    fn validate_create(&self) -> Result<()> {
        Ok(())
    }

    /// Checks fields required to update the resource.
    fn validate_update(&self) -> Result<()> {
        require_id(self.id(), "id")
    }

    /// Clears fields the server refuses on create.
    fn prepare_create(&mut self) {}

    /// Clears server-managed fields before an update.
    fn permit_fields(&mut self) {}
}

/// Fails with [`Error::MissingField`] when `id` is zero.
pub(crate) fn require_id(id: u64, field: &'static str) -> Result<()> {
    if id == 0 {
        Err(Error::MissingField(field))
    } else {
        Ok(())
    }
}

/// Fails with [`Error::MissingField`] when `value` is blank.
pub(crate) fn require_str(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::MissingField(field))
    } else {
        Ok(())
    }
}

impl TonicPowClient {
    /// `POST {MODEL}`, expecting 201.
    pub(crate) async fn create_resource<R: Resource>(&self, resource: &R) -> Result<R> {
        resource.validate_create()?;
        let mut body = resource.clone();
        body.prepare_create();
        self.request_json(ApiRequest::post(R::MODEL).json(&body)?)
            .await
    }

    /// `GET {MODEL}/details/{id}`, expecting 200.
    pub(crate) async fn get_resource<R: Resource>(&self, id: u64) -> Result<R> {
        require_id(id, "id")?;
        self.request_json(ApiRequest::get(format!("{}/details/{id}", R::MODEL)))
            .await
    }

    /// `PUT {MODEL}` with server-managed fields cleared, expecting 200.
    ///
    /// The caller's value is left untouched.
    pub(crate) async fn update_resource<R: Resource>(&self, resource: &R) -> Result<R> {
        resource.validate_update()?;
        let mut body = resource.clone();
        body.permit_fields();
        self.request_json(ApiRequest::put(R::MODEL).json(&body)?)
            .await
    }
}
