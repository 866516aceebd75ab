//
//  tonicpow
//  api/resources/advertisers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Advertiser profiles and the campaigns and apps they own.
//!
//! # Example
//!
//! ```rust,no_run
//! use tonicpow::api::{ListOptions, TonicPowClient};
//! use tonicpow::prelude::*;
//!
//! # async fn example() -> tonicpow::Result<()> {
//! let client = TonicPowClient::with_api_key("your-api-key")?;
//! let profile = client.get_advertiser_profile(23).await?;
//! let campaigns = client
//!     .list_campaigns_by_advertiser_profile(profile.id, ListOptions::new().page(1).per_page(25))
//!     .await?;
//! println!("{} has {} campaigns", profile.name, campaigns.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{is_zero, require_id, App, Campaign, Resource};
use crate::api::client::TonicPowClient;
use crate::api::common::{ListOptions, PageResults, Result, APP_SORT_FIELDS, CAMPAIGN_SORT_FIELDS};
use crate::api::request::ApiRequest;

const MODEL: &str = "advertisers";

/// The public face of an advertiser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvertiserProfile {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub homepage_url: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub icon_url: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub public_guid: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_id: u64,
}

impl Resource for AdvertiserProfile {
    const MODEL: &'static str = MODEL;

    fn id(&self) -> u64 {
        self.id
    }

    fn validate_create(&self) -> Result<()> {
        require_id(self.user_id, "user_id")
    }

    fn permit_fields(&mut self) {
        self.user_id = 0;
    }
}

/// Advertiser profile endpoints.
#[async_trait]
pub trait AdvertiserService {
    /// Creates a profile; `user_id` is required.
    async fn create_advertiser_profile(
        &self,
        profile: &AdvertiserProfile,
    ) -> Result<AdvertiserProfile>;

    async fn get_advertiser_profile(&self, profile_id: u64) -> Result<AdvertiserProfile>;

    /// Updates a profile; `id` is required and `user_id` is never sent.
    async fn update_advertiser_profile(
        &self,
        profile: &AdvertiserProfile,
    ) -> Result<AdvertiserProfile>;

    /// Campaigns owned by a profile.
    async fn list_campaigns_by_advertiser_profile(
        &self,
        profile_id: u64,
        options: ListOptions,
    ) -> Result<PageResults<Campaign>>;

    /// Apps owned by a profile.
    async fn list_apps_by_advertiser_profile(
        &self,
        profile_id: u64,
        options: ListOptions,
    ) -> Result<PageResults<App>>;
}

#[async_trait]
impl AdvertiserService for TonicPowClient {
    async fn create_advertiser_profile(
        &self,
        profile: &AdvertiserProfile,
    ) -> Result<AdvertiserProfile> {
        self.create_resource(profile).await
    }

    async fn get_advertiser_profile(&self, profile_id: u64) -> Result<AdvertiserProfile> {
        self.get_resource(profile_id).await
    }

    async fn update_advertiser_profile(
        &self,
        profile: &AdvertiserProfile,
    ) -> Result<AdvertiserProfile> {
        self.update_resource(profile).await
    }

    async fn list_campaigns_by_advertiser_profile(
        &self,
        profile_id: u64,
        options: ListOptions,
    ) -> Result<PageResults<Campaign>> {
        require_id(profile_id, "advertiser_profile_id")?;
        let pairs = options.query_pairs(CAMPAIGN_SORT_FIELDS)?;
        self.request_json(ApiRequest::get(format!("{MODEL}/campaigns/{profile_id}")).query_pairs(pairs))
            .await
    }

    async fn list_apps_by_advertiser_profile(
        &self,
        profile_id: u64,
        options: ListOptions,
    ) -> Result<PageResults<App>> {
        require_id(profile_id, "advertiser_profile_id")?;
        let pairs = options.query_pairs(APP_SORT_FIELDS)?;
        self.request_json(ApiRequest::get(format!("{MODEL}/apps/{profile_id}")).query_pairs(pairs))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::test_client;
    use crate::api::common::{Error, SortOrder};
    use mockito::Matcher;

    fn test_profile() -> AdvertiserProfile {
        AdvertiserProfile {
            homepage_url: "https://tonicpow.com".to_string(),
            icon_url: "https://i.imgur.com/HvVmeWI.png".to_string(),
            public_guid: "a4503e16b25c29b9cf58eee3ad353410".to_string(),
            name: "TonicPow".to_string(),
            id: 23,
            user_id: 43,
        }
    }

    #[tokio::test]
    async fn test_get_advertiser_profile() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/advertisers/details/23")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":23,"name":"TonicPow Test"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let profile = client.get_advertiser_profile(23).await.unwrap();
        assert_eq!(profile.name, "TonicPow Test");
        assert_eq!(profile.id, 23);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_advertiser_profile_missing_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.get_advertiser_profile(0).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("id")));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_advertiser_profile_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/advertisers/details/23")
            .with_status(400)
            .with_body(r#"{"code":400,"message":"some error message"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.get_advertiser_profile(23).await.unwrap_err();
        assert_eq!(err.to_string(), "some error message");
        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_advertiser_profile_requires_user() {
        let server = mockito::Server::new_async().await;
        let client = test_client(&server);
        let profile = AdvertiserProfile {
            user_id: 0,
            ..test_profile()
        };
        let err = client.create_advertiser_profile(&profile).await.unwrap_err();
        assert_eq!(err.to_string(), "missing required attribute: user_id");
    }

    #[tokio::test]
    async fn test_update_advertiser_profile_omits_user_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/v1/advertisers")
            .match_body(Matcher::Json(serde_json::json!({
                "homepage_url": "https://tonicpow.com",
                "icon_url": "https://i.imgur.com/HvVmeWI.png",
                "public_guid": "a4503e16b25c29b9cf58eee3ad353410",
                "name": "TonicPow",
                "id": 23
            })))
            .with_status(200)
            .with_body(r#"{"id":23,"name":"TonicPow","user_id":43}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let profile = test_profile();
        let updated = client.update_advertiser_profile(&profile).await.unwrap();
        assert_eq!(updated.user_id, 43);
        assert_eq!(profile.user_id, 43);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_campaigns_by_advertiser_profile() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/advertisers/campaigns/23")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("current_page".into(), "2".into()),
                Matcher::UrlEncoded("results_per_page".into(), "5".into()),
                Matcher::UrlEncoded("sort_by".into(), "balance".into()),
                Matcher::UrlEncoded("sort_order".into(), "asc".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"campaigns":[{"id":1},{"id":2}],"current_page":2,"results":2,"results_per_page":5}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let options = ListOptions::new()
            .page(2)
            .per_page(5)
            .sort_by("balance")
            .sort_order(SortOrder::Asc);
        let page = client
            .list_campaigns_by_advertiser_profile(23, options)
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.current_page, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_apps_rejects_unknown_sort() {
        let server = mockito::Server::new_async().await;
        let client = test_client(&server);
        let err = client
            .list_apps_by_advertiser_profile(23, ListOptions::new().sort_by("balance"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "sort by balance is not valid");

        let err = client
            .list_apps_by_advertiser_profile(0, ListOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("advertiser_profile_id")));
    }
}
