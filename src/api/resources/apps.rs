//
//  tonicpow
//  api/resources/apps.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Apps registered under an advertiser profile.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{is_zero, require_id, require_str, Resource};
use crate::api::client::TonicPowClient;
use crate::api::common::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct App {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub advertiser_profile_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_id: u64,
}

impl Resource for App {
    const MODEL: &'static str = "apps";

    fn id(&self) -> u64 {
        self.id
    }

    fn validate_create(&self) -> Result<()> {
        require_id(self.advertiser_profile_id, "advertiser_profile_id")?;
        require_str(&self.name, "name")
    }

    fn validate_update(&self) -> Result<()> {
        require_id(self.id, "app_id")
    }
}

#[async_trait]
pub trait AppService {
    /// Creates an app; `advertiser_profile_id` and `name` are required.
    async fn create_app(&self, app: &App) -> Result<App>;

    async fn get_app(&self, app_id: u64) -> Result<App>;

    async fn update_app(&self, app: &App) -> Result<App>;
}

#[async_trait]
impl AppService for TonicPowClient {
    async fn create_app(&self, app: &App) -> Result<App> {
        self.create_resource(app).await
    }

    async fn get_app(&self, app_id: u64) -> Result<App> {
        self.get_resource(app_id).await
    }

    async fn update_app(&self, app: &App) -> Result<App> {
        self.update_resource(app).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::test_client;
    use crate::api::common::Error;

    #[tokio::test]
    async fn test_create_app_validation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/v1/apps").expect(0).create_async().await;
        let client = test_client(&server);

        let err = client.create_app(&App::default()).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("advertiser_profile_id")));

        let app = App {
            advertiser_profile_id: 23,
            ..App::default()
        };
        let err = client.create_app(&app).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("name")));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_and_get_app() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/v1/apps")
            .with_status(201)
            .with_body(r#"{"id":7,"advertiser_profile_id":23,"name":"Test App"}"#)
            .create_async()
            .await;
        let get = server
            .mock("GET", "/v1/apps/details/7")
            .with_status(200)
            .with_body(r#"{"id":7,"advertiser_profile_id":23,"name":"Test App","user_id":43}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let app = App {
            advertiser_profile_id: 23,
            name: "Test App".to_string(),
            ..App::default()
        };
        let created = client.create_app(&app).await.unwrap();
        assert_eq!(created.id, 7);

        let fetched = client.get_app(created.id).await.unwrap();
        assert_eq!(fetched.name, app.name);
        assert_eq!(fetched.user_id, 43);
        create.assert_async().await;
        get.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_app_requires_id() {
        let server = mockito::Server::new_async().await;
        let client = test_client(&server);
        let err = client.update_app(&App::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "missing required attribute: app_id");
    }
}
