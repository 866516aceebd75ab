//
//  tonicpow
//  api/resources/campaigns.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Campaigns, their feeds and statistics.
//!
//! # Overview
//!
//! A campaign belongs to an advertiser profile, carries a funded balance and
//! pays promoters per click or per goal conversion. Listing is paginated and
//! sorted by one of [`CAMPAIGN_SORT_FIELDS`].
//!
//! # Example
//!
//! ```rust,no_run
//! use tonicpow::api::{CampaignListOptions, FeedType, TonicPowClient};
//! use tonicpow::prelude::*;
//!
//! # async fn example() -> tonicpow::Result<()> {
//! let client = TonicPowClient::with_api_key("your-api-key")?;
//!
//! let options = CampaignListOptions::new()
//!     .page(1)
//!     .per_page(25)
//!     .sort_by("balance")
//!     .minimum_balance(1_000);
//! for campaign in client.list_campaigns(options).await?.iter() {
//!     println!("{} ({})", campaign.title, campaign.balance);
//! }
//!
//! let rss = client.campaigns_feed(FeedType::Rss).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! An unknown sort field is rejected locally, while an unknown feed type is
//! coerced to [`FeedType::Rss`].

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{is_zero, require_id, require_str, AdvertiserProfile, Goal, Resource};
use crate::api::client::TonicPowClient;
use crate::api::common::{ListOptions, PageResults, Result, SortOrder, CAMPAIGN_SORT_FIELDS};
use crate::api::request::ApiRequest;

const MODEL: &str = "campaigns";

/// A funded advertising campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser_profile: Option<AdvertiserProfile>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub advertiser_profile_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub balance: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub balance_satoshis: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub bot_protection: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub contribute_enabled: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub expires_at: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub funding_address: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<Goal>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<CampaignImage>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub links_created: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub match_domain: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub paid_clicks: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub paid_conversions: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub pay_per_click_rate: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub public_guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<CampaignRequirements>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub target_url: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub title: String,
}

impl Resource for Campaign {
    const MODEL: &'static str = MODEL;

    fn id(&self) -> u64 {
        self.id
    }

    fn validate_create(&self) -> Result<()> {
        require_id(self.advertiser_profile_id, "advertiser_profile_id")
    }

    fn permit_fields(&mut self) {
        self.advertiser_profile_id = 0;
        self.balance = 0.0;
        self.balance_satoshis = 0;
        self.paid_clicks = 0;
        self.funding_address.clear();
        self.links_created = 0;
        self.public_guid.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignImage {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub height: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub url: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub width: u32,
}

/// Wallets a promoter must have linked to take part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRequirements {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dot_wallet: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub handcash: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub moneybutton: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub relay: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub twetch: bool,
}

/// Campaign counts across the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStatistics {
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub expired: u64,
}

/// Output format of [`CampaignService::campaigns_feed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    #[default]
    Rss,
    Atom,
    Json,
}

impl FeedType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::Atom => "atom",
            Self::Json => "json",
        }
    }

    /// Parses a feed type, falling back to RSS for anything unknown.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "atom" => Self::Atom,
            "json" => Self::Json,
            _ => Self::Rss,
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FeedType {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

/// Filters for [`CampaignService::list_campaigns`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignListOptions {
    pub list: ListOptions,
    /// Free-text search; omitted when empty.
    pub search_query: String,
    /// Minimum balance in satoshis; omitted when zero.
    pub minimum_balance: u64,
    /// Include campaigns past their expiry.
    pub include_expired: bool,
}

impl CampaignListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.list.page = page;
        self
    }

    pub fn per_page(mut self, results_per_page: u32) -> Self {
        self.list.results_per_page = results_per_page;
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.list.sort_by = Some(field.into());
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.list.sort_order = Some(order);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn minimum_balance(mut self, satoshis: u64) -> Self {
        self.minimum_balance = satoshis;
        self
    }

    pub fn include_expired(mut self, include: bool) -> Self {
        self.include_expired = include;
        self
    }

    fn query_pairs(&self) -> Result<Vec<(String, String)>> {
        let mut pairs = self.list.query_pairs(CAMPAIGN_SORT_FIELDS)?;
        if !self.search_query.trim().is_empty() {
            pairs.push(("search_query".to_string(), self.search_query.clone()));
        }
        if self.minimum_balance > 0 {
            pairs.push(("minimum_balance".to_string(), self.minimum_balance.to_string()));
        }
        if self.include_expired {
            pairs.push(("include_expired".to_string(), "true".to_string()));
        }
        Ok(pairs)
    }
}

impl From<ListOptions> for CampaignListOptions {
    fn from(list: ListOptions) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }
}

/// Campaign endpoints.
#[async_trait]
pub trait CampaignService {
    /// Creates a campaign; `advertiser_profile_id` is required.
    async fn create_campaign(&self, campaign: &Campaign) -> Result<Campaign>;

    async fn get_campaign(&self, campaign_id: u64) -> Result<Campaign>;

    /// Finds the campaign behind a link short code.
    async fn get_campaign_by_short_code(&self, short_code: &str) -> Result<Campaign>;

    async fn get_campaign_by_slug(&self, slug: &str) -> Result<Campaign>;

    /// Refreshes a campaign's balance from the chain.
    async fn get_campaign_balance(&self, campaign_id: u64, last_balance: i64) -> Result<Campaign>;

    /// Updates a campaign; balances, counters and the funding address are
    /// never sent.
    async fn update_campaign(&self, campaign: &Campaign) -> Result<Campaign>;

    async fn list_campaigns(&self, options: CampaignListOptions) -> Result<PageResults<Campaign>>;

    /// Campaigns promoting `target_url`.
    async fn list_campaigns_by_url(
        &self,
        target_url: &str,
        options: ListOptions,
    ) -> Result<PageResults<Campaign>>;

    /// Raw feed document of active campaigns.
    async fn campaigns_feed(&self, feed_type: FeedType) -> Result<String>;

    async fn campaign_statistics(&self) -> Result<CampaignStatistics>;
}

#[async_trait]
impl CampaignService for TonicPowClient {
    async fn create_campaign(&self, campaign: &Campaign) -> Result<Campaign> {
        self.create_resource(campaign).await
    }

    async fn get_campaign(&self, campaign_id: u64) -> Result<Campaign> {
        self.get_resource(campaign_id).await
    }

    async fn get_campaign_by_short_code(&self, short_code: &str) -> Result<Campaign> {
        require_str(short_code, "short_code")?;
        self.request_json(ApiRequest::get(format!("{MODEL}/link")).segment(short_code.trim()))
            .await
    }

    async fn get_campaign_by_slug(&self, slug: &str) -> Result<Campaign> {
        require_str(slug, "slug")?;
        self.request_json(ApiRequest::get(format!("{MODEL}/slug")).segment(slug.trim()))
            .await
    }

    async fn get_campaign_balance(&self, campaign_id: u64, last_balance: i64) -> Result<Campaign> {
        require_id(campaign_id, "id")?;
        self.request_json(
            ApiRequest::get(format!("{MODEL}/balance/{campaign_id}"))
                .query("last_balance", last_balance),
        )
        .await
    }

    async fn update_campaign(&self, campaign: &Campaign) -> Result<Campaign> {
        self.update_resource(campaign).await
    }

    async fn list_campaigns(&self, options: CampaignListOptions) -> Result<PageResults<Campaign>> {
        let pairs = options.query_pairs()?;
        self.request_json(ApiRequest::get(format!("{MODEL}/list")).query_pairs(pairs))
            .await
    }

    async fn list_campaigns_by_url(
        &self,
        target_url: &str,
        options: ListOptions,
    ) -> Result<PageResults<Campaign>> {
        require_str(target_url, "target_url")?;
        let pairs = options.query_pairs(CAMPAIGN_SORT_FIELDS)?;
        let request = ApiRequest::get(format!("{MODEL}/find"))
            .query("target_url", target_url)
            .query_pairs(pairs);
        self.request_json(request).await
    }

    async fn campaigns_feed(&self, feed_type: FeedType) -> Result<String> {
        let request = ApiRequest::get(format!("{MODEL}/feed")).query("feed_type", feed_type);
        Ok(self.request(request).await?.text())
    }

    async fn campaign_statistics(&self) -> Result<CampaignStatistics> {
        self.request_json(ApiRequest::get(format!("{MODEL}/statistics")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::test_client;
    use crate::api::common::Error;
    use mockito::Matcher;

    fn test_campaign() -> Campaign {
        Campaign {
            created_at: "2021-01-01 00:00:01".to_string(),
            currency: "usd".to_string(),
            description: "This is a test campaign".to_string(),
            funding_address: "124oW4xLDfay1BXmubUG9r64bGCCxnuf4g".to_string(),
            public_guid: "b02e13a7001546b1b7efb9df40ab75e5".to_string(),
            slug: "tonicpow".to_string(),
            target_url: "https://tonicpow.com".to_string(),
            title: "TonicPow".to_string(),
            advertiser_profile_id: 23,
            balance: 13.37,
            pay_per_click_rate: 1.0,
            balance_satoshis: 11_333_377,
            id: 23,
            links_created: 1,
            paid_clicks: 1,
            paid_conversions: 1,
            requirements: Some(CampaignRequirements {
                handcash: true,
                moneybutton: true,
                ..CampaignRequirements::default()
            }),
            images: vec![CampaignImage {
                height: 300,
                mime_type: "image/jpeg".to_string(),
                url: "https://res.cloudinary.com/tonicpow/image/upload/test.jpg".to_string(),
                width: 600,
            }],
            bot_protection: true,
            contribute_enabled: true,
            match_domain: true,
            ..Campaign::default()
        }
    }

    #[test]
    fn test_permit_fields() {
        let mut campaign = test_campaign();
        campaign.permit_fields();
        assert_eq!(campaign.advertiser_profile_id, 0);
        assert_eq!(campaign.balance, 0.0);
        assert_eq!(campaign.balance_satoshis, 0);
        assert!(campaign.funding_address.is_empty());
        assert!(campaign.public_guid.is_empty());
        assert_eq!(campaign.paid_conversions, 1);
        assert_eq!(campaign.title, "TonicPow");
    }

    #[test]
    fn test_feed_type_is_lenient() {
        assert_eq!(FeedType::from("ATOM "), FeedType::Atom);
        assert_eq!(FeedType::from("json"), FeedType::Json);
        assert_eq!(FeedType::from(""), FeedType::Rss);
        assert_eq!(FeedType::from("xml"), FeedType::Rss);
        assert_eq!(FeedType::Atom.to_string(), "atom");
    }

    #[test]
    fn test_campaign_round_trip_keeps_fields() {
        let campaign = test_campaign();
        let json = serde_json::to_string(&campaign).unwrap();
        let decoded: Campaign = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, campaign);
        assert!(!json.contains("expires_at"));
        assert!(!json.contains("dot_wallet"));
    }

    #[tokio::test]
    async fn test_create_campaign() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/campaigns")
            .with_status(201)
            .with_body(serde_json::to_string(&test_campaign()).unwrap())
            .create_async()
            .await;

        let client = test_client(&server);
        let created = client.create_campaign(&test_campaign()).await.unwrap();
        assert_eq!(created.id, 23);
        assert_eq!(created.title, "TonicPow");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_campaign_missing_advertiser() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/v1/campaigns").expect(0).create_async().await;

        let client = test_client(&server);
        let campaign = Campaign {
            advertiser_profile_id: 0,
            ..test_campaign()
        };
        let err = client.create_campaign(&campaign).await.unwrap_err();
        assert_eq!(err.to_string(), "missing required attribute: advertiser_profile_id");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_campaign_strips_managed_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/v1/campaigns")
            .match_body(Matcher::PartialJson(serde_json::json!({"id": 23, "title": "TonicPow"})))
            .with_status(200)
            .with_body(r#"{"id":23,"title":"TonicPow","balance":13.37}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let updated = client.update_campaign(&test_campaign()).await.unwrap();
        assert_eq!(updated.balance, 13.37);
        mock.assert_async().await;

        let body: serde_json::Value =
            serde_json::from_str(&client.last_request().unwrap().post_data).unwrap();
        assert!(body.get("balance").is_none());
        assert!(body.get("funding_address").is_none());
        assert!(body.get("advertiser_profile_id").is_none());
    }

    #[tokio::test]
    async fn test_list_campaigns_defaults_sort() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/campaigns/list")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("current_page".into(), "1".into()),
                Matcher::UrlEncoded("results_per_page".into(), "20".into()),
                Matcher::UrlEncoded("sort_by".into(), "created_at".into()),
                Matcher::UrlEncoded("sort_order".into(), "desc".into()),
                Matcher::UrlEncoded("search_query".into(), "tonic pow".into()),
                Matcher::UrlEncoded("minimum_balance".into(), "500".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"campaigns":[{"id":23,"title":"TonicPow"}],"current_page":1,"results":1,"results_per_page":20}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let options = CampaignListOptions::new()
            .page(1)
            .per_page(20)
            .search("tonic pow")
            .minimum_balance(500);
        let page = client.list_campaigns(options).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].title, "TonicPow");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_campaigns_bad_sort_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client
            .list_campaigns(CampaignListOptions::new().sort_by("bad_field"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSortField(ref field) if field == "bad_field"));
        assert_eq!(err.to_string(), "sort by bad_field is not valid");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_campaigns_by_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/campaigns/find")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("target_url".into(), "https://tonicpow.com".into()),
                Matcher::UrlEncoded("sort_by".into(), "PAID_CLICKS".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"campaigns":[],"current_page":1,"results":0,"results_per_page":20}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let page = client
            .list_campaigns_by_url("https://tonicpow.com", ListOptions::new().sort_by("PAID_CLICKS"))
            .await
            .unwrap();
        assert!(page.is_empty());
        mock.assert_async().await;

        let err = client
            .list_campaigns_by_url("", ListOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("target_url")));
    }

    #[tokio::test]
    async fn test_campaigns_feed_returns_raw_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/campaigns/feed")
            .match_query(Matcher::UrlEncoded("feed_type".into(), "rss".into()))
            .with_status(200)
            .with_header("content-type", "application/rss+xml")
            .with_body("<rss></rss>")
            .create_async()
            .await;

        let client = test_client(&server);
        let feed = client.campaigns_feed(FeedType::from("unknown")).await.unwrap();
        assert_eq!(feed, "<rss></rss>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_campaign_statistics_and_slug() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/campaigns/statistics")
            .with_status(200)
            .with_body(r#"{"active":12,"expired":3}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/v1/campaigns/slug/tonicpow")
            .with_status(200)
            .with_body(r#"{"id":23,"slug":"tonicpow"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let stats = client.campaign_statistics().await.unwrap();
        assert_eq!(stats, CampaignStatistics { active: 12, expired: 3 });

        let campaign = client.get_campaign_by_slug("tonicpow").await.unwrap();
        assert_eq!(campaign.id, 23);
    }
}
