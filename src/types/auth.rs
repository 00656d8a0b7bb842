use serde::{Deserialize, Serialize};

pub const STATUS_AUTHENTICATED: &str = "Authenticated";
pub const ERROR_ALREADY_REGISTERED: &str = "Already Registered";

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// `{userName, status?, error?}`; absent fields are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl AuthResponse {
    pub fn authenticated(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            status: Some(STATUS_AUTHENTICATED.to_string()),
            error: None,
        }
    }

    /// Credentials rejected: only the echoed user name.
    pub fn anonymous(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            status: None,
            error: None,
        }
    }

    pub fn already_registered(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            status: None,
            error: Some(ERROR_ALREADY_REGISTERED.to_string()),
        }
    }

    pub fn logged_out() -> Self {
        Self::anonymous("")
    }
}
