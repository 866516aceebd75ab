//
//  tonicpow
//  api/resources/visitors.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Visitor sessions, started when someone follows a tracking link.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{is_zero, require_id, require_str};
use crate::api::client::TonicPowClient;
use crate::api::common::Result;
use crate::api::request::ApiRequest;

const MODEL: &str = "visitors/sessions";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorSession {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub additional_data: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub custom_dimensions: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub link_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub provider: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub referer: String,
    /// Session GUID.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub tncpw_session: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_agent: String,
}

#[async_trait]
pub trait VisitorService {
    /// Starts a session; `link_id` is required.
    async fn create_visitor_session(&self, session: &VisitorSession) -> Result<VisitorSession>;

    async fn get_visitor_session(&self, session_guid: &str) -> Result<VisitorSession>;
}

#[async_trait]
impl VisitorService for TonicPowClient {
    async fn create_visitor_session(&self, session: &VisitorSession) -> Result<VisitorSession> {
        require_id(session.link_id, "link_id")?;
        self.request_json(ApiRequest::post(MODEL).json(session)?)
            .await
    }

    async fn get_visitor_session(&self, session_guid: &str) -> Result<VisitorSession> {
        require_str(session_guid, "tncpw_session")?;
        self.request_json(ApiRequest::get(format!("{MODEL}/details")).segment(session_guid.trim()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::test_client;
    use crate::api::common::Error;
    use mockito::Matcher;

    const TEST_SESSION: &str = "TestSessionKey12345678987654321";

    #[tokio::test]
    async fn test_create_visitor_session() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/visitors/sessions")
            .match_body(Matcher::Json(serde_json::json!({"link_id": 5, "provider": "web"})))
            .with_status(201)
            .with_body(format!(r#"{{"link_id":5,"provider":"web","tncpw_session":"{TEST_SESSION}"}}"#))
            .create_async()
            .await;

        let client = test_client(&server);
        let session = VisitorSession {
            link_id: 5,
            provider: "web".to_string(),
            ..VisitorSession::default()
        };
        let created = client.create_visitor_session(&session).await.unwrap();
        assert_eq!(created.tncpw_session, TEST_SESSION);
        mock.assert_async().await;

        let err = client
            .create_visitor_session(&VisitorSession::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("link_id")));
    }

    #[tokio::test]
    async fn test_get_visitor_session() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", format!("/v1/visitors/sessions/details/{TEST_SESSION}").as_str())
            .with_status(200)
            .with_body(format!(r#"{{"link_id":5,"tncpw_session":"{TEST_SESSION}"}}"#))
            .create_async()
            .await;

        let client = test_client(&server);
        let session = client.get_visitor_session(TEST_SESSION).await.unwrap();
        assert_eq!(session.link_id, 5);
        mock.assert_async().await;
    }
}
