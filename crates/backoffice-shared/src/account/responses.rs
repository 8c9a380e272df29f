use crate::{
    account::{EmailAddress, UserProfile},
    id::UserId,
};

/// Body returned by a successful login
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

/// Acknowledgement of an OTP request
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct OtpRequestAck {
    pub message: String,
    /// Development-mode echo of the generated OTP, absent in production
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_otp: Option<String>,
}

/// Generic `{message}` acknowledgement used by the reset endpoints
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct MessageAck {
    pub message: String,
}

/// Result of a privileged password reset
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct AdminResetOutcome {
    pub message: String,
    pub user_id: UserId,
    pub email: EmailAddress,
    pub password_updated: bool,
}
