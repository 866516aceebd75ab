//
//  tonicpow
//  api/resources/conversions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Goal conversions.
//!
//! # Overview
//!
//! A conversion pays out a campaign goal to the promoter behind a visitor
//! session or a user. Build one with [`ConversionRequest`]:
//!
//! ```rust
//! use tonicpow::api::ConversionRequest;
//!
//! let request = ConversionRequest::new()
//!     .goal_name("signup")
//!     .tncpw_session("TestSessionKey12345678987654321")
//!     .purchase_amount(9.99)
//!     .delay_in_minutes(5);
//! assert!(request.validate().is_ok());
//!
//! assert!(ConversionRequest::new().user_id(43).validate().is_err());
//! ```
//!
//! # Notes
//!
//! All values travel as strings on the wire.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{is_zero, require_id, Resource};
use crate::api::client::TonicPowClient;
use crate::api::common::{Error, Result};
use crate::api::request::ApiRequest;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub campaign_id: u64,
    /// Free-form JSON supplied by the advertiser.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub custom_dimensions: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub goal_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub goal_name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub payout_after: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub status: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub status_data: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub tx_id: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_id: u64,
}

impl Resource for Conversion {
    const MODEL: &'static str = "conversions";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Which goal a conversion is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalRef {
    Id(u64),
    Name(String),
}

/// Who earns the conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Converter {
    /// Visitor session GUID from the `tncpw_session` cookie or parameter.
    Session(String),
    User(u64),
}

/// Parameters for [`ConversionService::create_conversion`].
///
/// A goal and a converter are required. Setting one variant replaces the
/// other (the last call wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionRequest {
    pub goal: Option<GoalRef>,
    pub converter: Option<Converter>,
    pub custom_dimensions: Option<String>,
    pub delay_in_minutes: i64,
    pub purchase_amount: f64,
}

impl ConversionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goal_id(mut self, goal_id: u64) -> Self {
        self.goal = Some(GoalRef::Id(goal_id));
        self
    }

    pub fn goal_name(mut self, name: impl Into<String>) -> Self {
        self.goal = Some(GoalRef::Name(name.into()));
        self
    }

    pub fn tncpw_session(mut self, session: impl Into<String>) -> Self {
        self.converter = Some(Converter::Session(session.into()));
        self
    }

    pub fn user_id(mut self, user_id: u64) -> Self {
        self.converter = Some(Converter::User(user_id));
        self
    }

    pub fn custom_dimensions(mut self, dimensions: impl Into<String>) -> Self {
        self.custom_dimensions = Some(dimensions.into());
        self
    }

    pub fn delay_in_minutes(mut self, minutes: i64) -> Self {
        self.delay_in_minutes = minutes;
        self
    }

    pub fn purchase_amount(mut self, amount: f64) -> Self {
        self.purchase_amount = amount;
        self
    }

    /// Checks that a goal and a converter are present and non-empty.
    pub fn validate(&self) -> Result<()> {
        match &self.goal {
            Some(GoalRef::Id(id)) => require_id(*id, "goal_id")?,
            Some(GoalRef::Name(name)) if !name.trim().is_empty() => {}
            _ => return Err(Error::MissingField("goal_id or name")),
        }
        match &self.converter {
            Some(Converter::User(id)) => require_id(*id, "user_id"),
            Some(Converter::Session(session)) if !session.trim().is_empty() => Ok(()),
            _ => Err(Error::MissingField("tncpw_session or user_id")),
        }
    }

    fn body(&self) -> ConversionBody {
        let mut body = ConversionBody {
            custom_dimensions: self.custom_dimensions.clone().unwrap_or_default(),
            delay_in_minutes: self.delay_in_minutes.to_string(),
            amount: format!("{:.6}", self.purchase_amount),
            ..ConversionBody::default()
        };
        match &self.goal {
            Some(GoalRef::Id(id)) => body.goal_id = Some(id.to_string()),
            Some(GoalRef::Name(name)) => body.name = Some(name.clone()),
            None => {}
        }
        match &self.converter {
            Some(Converter::Session(session)) => body.tncpw_session = Some(session.clone()),
            Some(Converter::User(id)) => body.user_id = Some(id.to_string()),
            None => {}
        }
        body
    }
}

#[derive(Debug, Default, Serialize)]
struct ConversionBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    goal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tncpw_session: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    custom_dimensions: String,
    delay_in_minutes: String,
    amount: String,
}

#[derive(Serialize)]
struct CancelBody<'a> {
    id: String,
    reason: &'a str,
}

#[async_trait]
pub trait ConversionService {
    async fn create_conversion(&self, request: &ConversionRequest) -> Result<Conversion>;

    async fn get_conversion(&self, conversion_id: u64) -> Result<Conversion>;

    /// Cancels a delayed conversion before it pays out.
    async fn cancel_conversion(&self, conversion_id: u64, reason: &str) -> Result<Conversion>;
}

#[async_trait]
impl ConversionService for TonicPowClient {
    async fn create_conversion(&self, request: &ConversionRequest) -> Result<Conversion> {
        request.validate()?;
        self.request_json(ApiRequest::post(Conversion::MODEL).json(&request.body())?)
            .await
    }

    async fn get_conversion(&self, conversion_id: u64) -> Result<Conversion> {
        self.get_resource(conversion_id).await
    }

    async fn cancel_conversion(&self, conversion_id: u64, reason: &str) -> Result<Conversion> {
        require_id(conversion_id, "id")?;
        let body = CancelBody {
            id: conversion_id.to_string(),
            reason,
        };
        self.request_json(ApiRequest::put(format!("{}/cancel", Conversion::MODEL)).json(&body)?)
            .await
    }
}
