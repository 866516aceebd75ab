//
//  tonicpow
//  api/resources/links.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tracking links created by promoters.
//!
//! A link points either at a campaign (`campaign_id`) or directly at a
//! target URL, and is reachable through its short code.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{is_zero, require_id, require_str, Resource};
use crate::api::client::TonicPowClient;
use crate::api::common::{PageResults, Result};
use crate::api::request::ApiRequest;

const MODEL: &str = "links";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub campaign_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub custom_short_code: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub short_code: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub short_code_url: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub target_url: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_clicks: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_conversions: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_id: u64,
}

impl Resource for Link {
    const MODEL: &'static str = MODEL;

    fn id(&self) -> u64 {
        self.id
    }

    fn validate_create(&self) -> Result<()> {
        require_id(self.campaign_id, "campaign_id")?;
        require_id(self.user_id, "user_id")
    }
}

#[async_trait]
pub trait LinkService {
    /// Creates a campaign link; `campaign_id` and `user_id` are required.
    async fn create_link(&self, link: &Link) -> Result<Link>;

    /// Creates a link straight to `target_url`, without a campaign.
    async fn create_link_by_url(&self, link: &Link) -> Result<Link>;

    async fn get_link(&self, link_id: u64) -> Result<Link>;

    /// Resolves a short code to its link.
    async fn check_link(&self, short_code: &str) -> Result<Link>;

    /// Links owned by a user.
    async fn list_links_by_user_id(
        &self,
        user_id: u64,
        page: u32,
        results_per_page: u32,
    ) -> Result<PageResults<Link>>;
}

#[async_trait]
impl LinkService for TonicPowClient {
    async fn create_link(&self, link: &Link) -> Result<Link> {
        self.create_resource(link).await
    }

    async fn create_link_by_url(&self, link: &Link) -> Result<Link> {
        require_str(&link.target_url, "target_url")?;
        require_id(link.user_id, "user_id")?;
        let body = Link {
            campaign_id: 0,
            ..link.clone()
        };
        self.request_json(ApiRequest::post(MODEL).json(&body)?)
            .await
    }

    async fn get_link(&self, link_id: u64) -> Result<Link> {
        self.get_resource(link_id).await
    }

    async fn check_link(&self, short_code: &str) -> Result<Link> {
        require_str(short_code, "short_code")?;
        self.request_json(ApiRequest::get(format!("{MODEL}/check")).segment(short_code.trim()))
            .await
    }

    async fn list_links_by_user_id(
        &self,
        user_id: u64,
        page: u32,
        results_per_page: u32,
    ) -> Result<PageResults<Link>> {
        require_id(user_id, "user_id")?;
        let request = ApiRequest::get("users/links")
            .query("id", user_id)
            .query("current_page", page)
            .query("results_per_page", results_per_page);
        self.request_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::test_client;
    use crate::api::common::Error;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_create_link_validation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/v1/links").expect(0).create_async().await;
        let client = test_client(&server);

        let err = client.create_link(&Link::default()).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("campaign_id")));

        let link = Link {
            campaign_id: 23,
            ..Link::default()
        };
        let err = client.create_link(&link).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("user_id")));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_link_by_url_drops_campaign() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/links")
            .match_body(Matcher::Json(serde_json::json!({
                "target_url": "https://tonicpow.com",
                "user_id": 43
            })))
            .with_status(201)
            .with_body(r#"{"id":5,"target_url":"https://tonicpow.com","user_id":43,"short_code":"abc"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let link = Link {
            campaign_id: 23,
            target_url: "https://tonicpow.com".to_string(),
            user_id: 43,
            ..Link::default()
        };
        let created = client.create_link_by_url(&link).await.unwrap();
        assert_eq!(created.short_code, "abc");
        assert_eq!(link.campaign_id, 23);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_check_link() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/links/check/abc")
            .with_status(200)
            .with_body(r#"{"id":5,"short_code":"abc","campaign_id":23}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let link = client.check_link("abc").await.unwrap();
        assert_eq!(link.campaign_id, 23);
        mock.assert_async().await;

        assert!(matches!(
            client.check_link("").await,
            Err(Error::MissingField("short_code"))
        ));
    }

    #[tokio::test]
    async fn test_list_links_by_user_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/users/links")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".into(), "43".into()),
                Matcher::UrlEncoded("current_page".into(), "1".into()),
                Matcher::UrlEncoded("results_per_page".into(), "10".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"links":[{"id":5},{"id":6}],"current_page":1,"results":2,"results_per_page":10}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let page = client.list_links_by_user_id(43, 1, 10).await.unwrap();
        let ids: Vec<u64> = page.iter().map(|link| link.id).collect();
        assert_eq!(ids, vec![5, 6]);
        mock.assert_async().await;
    }
}
