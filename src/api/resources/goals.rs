//
//  tonicpow
//  api/resources/goals.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Campaign goals. A goal defines what a conversion pays out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{is_zero, require_id, Resource};
use crate::api::client::TonicPowClient;
use crate::api::common::Result;
use crate::api::request::ApiRequest;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub campaign_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_per_promoter: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub payout_rate: f64,
    /// `flat` or `percent`.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub payout_type: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub payouts: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub title: String,
}

impl Resource for Goal {
    const MODEL: &'static str = "goals";

    fn id(&self) -> u64 {
        self.id
    }

    fn validate_create(&self) -> Result<()> {
        require_id(self.campaign_id, "campaign_id")
    }

    fn permit_fields(&mut self) {
        self.campaign_id = 0;
        self.payouts = 0;
    }
}

#[async_trait]
pub trait GoalService {
    /// Creates a goal; `campaign_id` is required.
    async fn create_goal(&self, goal: &Goal) -> Result<Goal>;

    async fn get_goal(&self, goal_id: u64) -> Result<Goal>;

    /// Updates a goal; `campaign_id` and `payouts` are never sent.
    async fn update_goal(&self, goal: &Goal) -> Result<Goal>;

    /// Deletes a goal, returning `true` on success.
    async fn delete_goal(&self, goal_id: u64) -> Result<bool>;
}

#[async_trait]
impl GoalService for TonicPowClient {
    async fn create_goal(&self, goal: &Goal) -> Result<Goal> {
        self.create_resource(goal).await
    }

    async fn get_goal(&self, goal_id: u64) -> Result<Goal> {
        self.get_resource(goal_id).await
    }

    async fn update_goal(&self, goal: &Goal) -> Result<Goal> {
        self.update_resource(goal).await
    }

    async fn delete_goal(&self, goal_id: u64) -> Result<bool> {
        require_id(goal_id, "id")?;
        self.request_empty(ApiRequest::delete(Goal::MODEL).query("id", goal_id))
            .await?;
        Ok(true)
    }
}
