//
//  tonicpow
//  api/resources/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User accounts, passwords, wallet balances and referrals.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{is_zero, require_id, require_str, Resource};
use crate::api::client::TonicPowClient;
use crate::api::common::{
    format_api_error, Error, ListOptions, PageResults, Result, REFERRAL_SORT_FIELDS,
};
use crate::api::request::ApiRequest;

const MODEL: &str = "users";

/// Shortest accepted password-reset token, exclusive.
const MIN_TOKEN_LENGTH: usize = 10;

/// A TonicPow user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub balance: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub earned: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub email: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub internal_address: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub middle_name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub new_password: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub new_password_confirm: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub password: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub payout_address: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub referral_link_id: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub referral_url: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub status: String,
}

impl Resource for User {
    const MODEL: &'static str = MODEL;

    fn id(&self) -> u64 {
        self.id
    }

    fn validate_create(&self) -> Result<()> {
        require_str(&self.email, "email")
    }

    fn prepare_create(&mut self) {
        self.permit_fields();
    }

    fn permit_fields(&mut self) {
        self.balance = 0;
        self.earned = 0;
        self.internal_address.clear();
        self.status.clear();
        self.referral_link_id = 0;
        self.referral_url.clear();
    }
}

/// Result of [`UserService::user_exists`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserExists {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub status: String,
}

/// A user together with the number of users they referred.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserReferral {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub referral_link_id: u64,
    #[serde(default)]
    pub referrals: u64,
}

/// Identifies a user by id or by email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(u64),
    Email(String),
}

impl UserLookup {
    fn validate(&self) -> Result<()> {
        match self {
            Self::Id(0) => Err(Error::MissingField("id or email")),
            Self::Email(email) if email.trim().is_empty() => {
                Err(Error::MissingField("id or email"))
            }
            _ => Ok(()),
        }
    }

    /// Field name and value as sent on the wire.
    fn pair(&self) -> (&'static str, String) {
        match self {
            Self::Id(id) => ("id", id.to_string()),
            Self::Email(email) => ("email", email.clone()),
        }
    }
}

impl From<u64> for UserLookup {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for UserLookup {
    fn from(email: &str) -> Self {
        Self::Email(email.to_string())
    }
}

impl From<String> for UserLookup {
    fn from(email: String) -> Self {
        Self::Email(email)
    }
}

/// Body for status and wallet actions. Ids travel as strings.
#[derive(Debug, Serialize)]
struct UserAction<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl<'a> UserAction<'a> {
    fn lookup(lookup: &UserLookup, reason: Option<&'a str>) -> Self {
        match lookup {
            UserLookup::Id(id) => Self {
                id: Some(id.to_string()),
                email: None,
                reason,
            },
            UserLookup::Email(email) => Self {
                id: None,
                email: Some(email.clone()),
                reason,
            },
        }
    }
}

#[derive(Serialize)]
struct PasswordReset<'a> {
    token: &'a str,
    password: &'a str,
    password_confirm: &'a str,
}

/// User endpoints.
#[async_trait]
pub trait UserService {
    /// Creates a user; `email` is required.
    async fn create_user(&self, user: &User) -> Result<User>;

    /// Updates a user; `id` is required.
    async fn update_user(&self, user: &User) -> Result<User>;

    /// Fetches a user by id or email.
    async fn get_user(&self, lookup: UserLookup) -> Result<User>;

    /// Refreshes a user's balance from the chain.
    async fn get_user_balance(&self, user_id: u64, last_balance: i64) -> Result<User>;

    /// Fetches the account of a logged-in user.
    async fn current_user(&self, user_id: u64) -> Result<User>;

    /// Authenticates a user.
    async fn login_user(&self, email: &str, password: &str) -> Result<User>;

    /// Ends a user's session identified by `session_token`.
    async fn logout_user(&self, session_token: &str) -> Result<()>;

    /// Sends a password reset email.
    async fn forgot_password(&self, email: &str) -> Result<()>;

    /// Completes a password reset started by [`forgot_password`](Self::forgot_password).
    async fn reset_password(&self, token: &str, password: &str, password_confirm: &str)
        -> Result<()>;

    /// Accepts a user when approval is required. `reason` may be empty.
    async fn accept_user(&self, lookup: UserLookup, reason: &str) -> Result<()>;

    async fn activate_user(&self, lookup: UserLookup) -> Result<()>;

    async fn pause_user(&self, lookup: UserLookup, reason: &str) -> Result<()>;

    /// Checks whether an email is registered; `None` when it is not.
    async fn user_exists(&self, email: &str) -> Result<Option<UserExists>>;

    /// Sends the internal balance to the user's payout address.
    async fn release_user_balance(&self, user_id: u64, reason: &str) -> Result<()>;

    /// Sends the internal balance back to the originating campaigns.
    async fn refund_user_balance(&self, user_id: u64, reason: &str) -> Result<()>;

    /// Users referred by the given user.
    async fn get_user_referrals(&self, lookup: UserLookup) -> Result<Vec<UserReferral>>;

    /// Users that have referrals, sorted by `created_at` or `referrals`.
    async fn list_user_referrals(&self, options: ListOptions) -> Result<PageResults<UserReferral>>;

    /// Asks for the user's account to be activated.
    async fn request_activation(&self, user_id: u64) -> Result<()>;
}

impl TonicPowClient {
    async fn user_action(
        &self,
        path: &str,
        lookup: &UserLookup,
        reason: Option<&str>,
    ) -> Result<()> {
        lookup.validate()?;
        let body = UserAction::lookup(lookup, reason);
        self.request_empty(ApiRequest::put(format!("{MODEL}/{path}")).json(&body)?)
            .await
    }

    async fn wallet_action(&self, path: &str, user_id: u64, reason: &str) -> Result<()> {
        require_id(user_id, "user_id")?;
        let body = UserAction {
            id: Some(user_id.to_string()),
            email: None,
            reason: Some(reason),
        };
        self.request_empty(ApiRequest::put(format!("{MODEL}/wallet/{path}")).json(&body)?)
            .await
    }
}

#[async_trait]
impl UserService for TonicPowClient {
    async fn create_user(&self, user: &User) -> Result<User> {
        self.create_resource(user).await
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        self.update_resource(user).await
    }

    async fn get_user(&self, lookup: UserLookup) -> Result<User> {
        lookup.validate()?;
        let (field, value) = lookup.pair();
        self.request_json(ApiRequest::get(format!("{MODEL}/details")).query(field, value))
            .await
    }

    async fn get_user_balance(&self, user_id: u64, last_balance: i64) -> Result<User> {
        require_id(user_id, "id")?;
        self.request_json(
            ApiRequest::get(format!("{MODEL}/balance/{user_id}")).query("last_balance", last_balance),
        )
        .await
    }

    async fn current_user(&self, user_id: u64) -> Result<User> {
        require_id(user_id, "id")?;
        self.request_json(ApiRequest::get(format!("{MODEL}/account")).query("id", user_id))
            .await
    }

    async fn login_user(&self, email: &str, password: &str) -> Result<User> {
        require_str(email, "email")?;
        if password.is_empty() {
            return Err(Error::MissingField("password"));
        }
        let body = User {
            email: email.to_string(),
            password: password.to_string(),
            ..User::default()
        };
        self.request_json(ApiRequest::post(format!("{MODEL}/login")).json(&body)?)
            .await
    }

    async fn logout_user(&self, session_token: &str) -> Result<()> {
        require_str(session_token, "session_token")?;
        self.request_empty(
            ApiRequest::delete(format!("{MODEL}/logout")).with_session_token(session_token),
        )
        .await
    }

    async fn forgot_password(&self, email: &str) -> Result<()> {
        require_str(email, "email")?;
        let request = ApiRequest::post(format!("{MODEL}/password/forgot"))
            .json(&serde_json::json!({ "email": email }))?
            .expect_status(StatusCode::OK);
        self.request_empty(request).await
    }

    async fn reset_password(
        &self,
        token: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<()> {
        if token.is_empty() {
            return Err(Error::MissingField("token"));
        }
        if token.len() <= MIN_TOKEN_LENGTH {
            return Err(Error::Validation(format!("invalid token: {token}")));
        }
        if password.is_empty() || password_confirm.is_empty() {
            return Err(Error::MissingField("password or password_confirm"));
        }
        if password != password_confirm {
            return Err(Error::Validation("given passwords don't match".to_string()));
        }
        let body = PasswordReset {
            token,
            password,
            password_confirm,
        };
        self.request_empty(ApiRequest::put(format!("{MODEL}/password/reset")).json(&body)?)
            .await
    }

    async fn accept_user(&self, lookup: UserLookup, reason: &str) -> Result<()> {
        self.user_action("status/accept", &lookup, Some(reason)).await
    }

    async fn activate_user(&self, lookup: UserLookup) -> Result<()> {
        self.user_action("status/activate", &lookup, None).await
    }

    async fn pause_user(&self, lookup: UserLookup, reason: &str) -> Result<()> {
        self.user_action("status/pause", &lookup, Some(reason)).await
    }

    async fn user_exists(&self, email: &str) -> Result<Option<UserExists>> {
        require_str(email, "email")?;
        let request = ApiRequest::get(format!("{MODEL}/exists")).query("email", email);
        let response = self.send(&request).await?;

        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if response.status != request.expected_status() {
            return Err(match response.error {
                Some(error) => Error::Api(Box::new(error)),
                None => format_api_error(response.status, &response.body),
            });
        }
        response.json().map(Some)
    }

    async fn release_user_balance(&self, user_id: u64, reason: &str) -> Result<()> {
        self.wallet_action("release", user_id, reason).await
    }

    async fn refund_user_balance(&self, user_id: u64, reason: &str) -> Result<()> {
        self.wallet_action("refund", user_id, reason).await
    }

    async fn get_user_referrals(&self, lookup: UserLookup) -> Result<Vec<UserReferral>> {
        lookup.validate()?;
        let (field, value) = lookup.pair();
        self.request_json(ApiRequest::get(format!("{MODEL}/referred")).query(field, value))
            .await
    }

    async fn list_user_referrals(&self, options: ListOptions) -> Result<PageResults<UserReferral>> {
        let pairs = options.query_pairs(REFERRAL_SORT_FIELDS)?;
        self.request_json(ApiRequest::get(format!("{MODEL}/referrals")).query_pairs(pairs))
            .await
    }

    async fn request_activation(&self, user_id: u64) -> Result<()> {
        require_id(user_id, "id")?;
        self.request_empty(ApiRequest::put(format!("{MODEL}/status/request")).query("id", user_id))
            .await
    }
}
