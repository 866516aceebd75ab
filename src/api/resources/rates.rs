//
//  tonicpow
//  api/resources/rates.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Currency exchange rates against BSV.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::require_str;
use crate::api::client::TonicPowClient;
use crate::api::common::Result;
use crate::api::request::ApiRequest;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    #[serde(default)]
    pub currency: String,
    /// The requested amount, in `currency`.
    #[serde(default)]
    pub currency_amount: f64,
    #[serde(default)]
    pub currency_name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub rate_last_updated: String,
    /// `currency_amount` converted to satoshis.
    #[serde(default)]
    pub satoshi_amount: i64,
}

#[async_trait]
pub trait RateService {
    /// Current rate for `currency`, converting `custom_amount` when it is
    /// above zero.
    async fn get_current_rate(&self, currency: &str, custom_amount: f64) -> Result<Rate>;
}

#[async_trait]
impl RateService for TonicPowClient {
    async fn get_current_rate(&self, currency: &str, custom_amount: f64) -> Result<Rate> {
        require_str(currency, "currency")?;
        let mut request = ApiRequest::get("rates").segment(currency.trim().to_lowercase());
        if custom_amount > 0.0 {
            request = request.query("amount", custom_amount);
        }
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
    async fn test_get_current_rate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/rates/usd")
            .match_query(Matcher::UrlEncoded("amount".into(), "1.5".into()))
            .with_status(200)
            .with_body(
                r#"{"currency":"usd","currency_amount":1.5,"currency_name":"US Dollar","price":150.0,"satoshi_amount":1000000}"#,
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let rate = client.get_current_rate("USD", 1.5).await.unwrap();
        assert_eq!(rate.currency_name, "US Dollar");
        assert_eq!(rate.satoshi_amount, 1_000_000);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_current_rate_without_amount() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/rates/usd")
            .with_status(200)
            .with_body(r#"{"currency":"usd","price":150.0}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let rate = client.get_current_rate("usd", 0.0).await.unwrap();
        assert_eq!(rate.price, 150.0);
        mock.assert_async().await;
        assert!(!client.last_request().unwrap().url.contains("amount"));

        let err = client.get_current_rate("", 0.0).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("currency")));
    }
}
