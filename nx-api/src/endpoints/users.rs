//! User and session endpoints.

use reqwest::Method;

use nx_core::error::NxResult;

use crate::client::ApiClient;
use crate::models::{CurrentUser, User};
use crate::response;

impl ApiClient {
    /// Authenticate against the server with the configured credentials and
    /// return the current user.
    pub async fn login(&self) -> NxResult<CurrentUser> {
        let url = self.rest_url("/automation/login");
        let outcome = self.send(Method::POST, &url, None).await;
        response::decode(outcome).await
    }

    /// Fetch a user by username.
    pub async fn get_user(&self, username: &str) -> NxResult<User> {
        let url = self.rest_url(&format!("/user/{username}"));
        let outcome = self.get(&url).await;
        response::decode(outcome).await
    }

    /// Create a user account. Returns the account as the server stored it.
    pub async fn create_user(&self, user: &User) -> NxResult<User> {
        let url = self.rest_url("/user");
        let body = serde_json::to_value(user)?;
        let outcome = self.post(&url, &body).await;
        response::decode(outcome).await
    }

    /// Delete a user account by username.
    pub async fn delete_user(&self, username: &str) -> NxResult<()> {
        let url = self.rest_url(&format!("/user/{username}"));
        let outcome = self.delete(&url).await;
        response::check(outcome).await
    }
}
