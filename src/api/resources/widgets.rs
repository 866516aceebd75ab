//
//  tonicpow
//  api/resources/widgets.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Embeddable widgets.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{is_zero, require_id, require_str, Resource};
use crate::api::client::TonicPowClient;
use crate::api::common::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub advertiser_profile_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub height: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub label: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub link_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub width: u32,
}

impl Resource for Widget {
    const MODEL: &'static str = "widgets";

    fn id(&self) -> u64 {
        self.id
    }

    fn validate_create(&self) -> Result<()> {
        require_str(&self.label, "label")
    }

    fn validate_update(&self) -> Result<()> {
        require_id(self.id, "widget_id")
    }
}

#[async_trait]
pub trait WidgetService {
    /// Creates a widget; `label` is required.
    async fn create_widget(&self, widget: &Widget) -> Result<Widget>;

    async fn get_widget(&self, widget_id: u64) -> Result<Widget>;

    async fn update_widget(&self, widget: &Widget) -> Result<Widget>;
}

#[async_trait]
impl WidgetService for TonicPowClient {
    async fn create_widget(&self, widget: &Widget) -> Result<Widget> {
        self.create_resource(widget).await
    }

    async fn get_widget(&self, widget_id: u64) -> Result<Widget> {
        self.get_resource(widget_id).await
    }

    async fn update_widget(&self, widget: &Widget) -> Result<Widget> {
        self.update_resource(widget).await
    }
}
