//! Registration and login endpoints

use crate::client::SiteTrackClient;
use crate::credentials::Credentials;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: SiteTrackClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: SiteTrackClient) -> Self {
        Self { client }
    }

    /// Register a new account
    ///
    /// POST /register
    pub async fn register(&self, account: &AccountRequest) -> ApiResult<RegisterResponse> {
        account.validate()?;
        self.client.post("register", account, None).await
    }

    /// Exchange username and password for a bearer token
    ///
    /// POST /login
    pub async fn login(&self, account: &AccountRequest) -> ApiResult<Credentials> {
        account.validate()?;
        let response: TokenResponse = self.client.post("login", account, None).await?;
        response.into_credentials()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Username and password, used for both registration and login
#[derive(Clone, Serialize, Deserialize)]
pub struct AccountRequest {
    /// Account name
    pub username: String,
    /// Plain-text password, sent only over the request body
    pub password: String,
}

impl AccountRequest {
    /// Create a new account request
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn validate(&self) -> ApiResult<()> {
        if self.username.trim().is_empty() {
            return Err(ApiError::invalid_request("username cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(ApiError::invalid_request("password cannot be empty"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub msg: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed token
    pub access_token: String,
    /// Token scheme, "bearer"
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl TokenResponse {
    /// Convert to credentials, rejecting non-bearer or empty tokens
    pub fn into_credentials(self) -> ApiResult<Credentials> {
        if !self.token_type.eq_ignore_ascii_case("bearer") {
            return Err(ApiError::invalid_request(format!(
                "unsupported token type: {}",
                self.token_type
            )));
        }
        if self.access_token.is_empty() {
            return Err(ApiError::invalid_request("login returned an empty token"));
        }
        Ok(Credentials::bearer(self.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_validation() {
        assert!(AccountRequest::new("ana", "pw").validate().is_ok());
        assert!(AccountRequest::new("  ", "pw").validate().is_err());
        assert!(AccountRequest::new("ana", "").validate().is_err());
    }

    #[test]
    fn test_account_debug_redacts_password() {
        let account = AccountRequest::new("ana", "hunter2");
        let debug = format!("{account:?}");
        assert!(debug.contains("ana"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_token_response_deserialize() {
        let json = r#"{"access_token": "eyJ.abc.def", "token_type": "bearer"}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        let creds = response.into_credentials().unwrap();
        assert_eq!(creds.token(), "eyJ.abc.def");
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let response: TokenResponse = serde_json::from_str(r#"{"access_token": "t"}"#).unwrap();
        assert_eq!(response.token_type, "bearer");
    }

    #[test]
    fn test_rejects_unknown_token_type() {
        let response = TokenResponse {
            access_token: "t".into(),
            token_type: "mac".into(),
        };
        assert!(response.into_credentials().is_err());
    }

    #[test]
    fn test_login_rejects_blank_username_before_sending() {
        let client = SiteTrackClient::with_config(
            crate::ClientConfig::development().with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();

        let result = tokio_test::block_on(client.auth().login(&AccountRequest::new(" ", "pw")));
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
