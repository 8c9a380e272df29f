use std::fmt::Display;

use crate::{
    account::{AccountStatus, Role},
    errors::ConversionError,
    id::UserId,
};

/// Login identifier, unique per account
///
/// Only lightly validated here, the server remains the authority on what it
/// will accept
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub const MAX_LENGTH: usize = 254;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        // Cheap shape check only, full validation is the server's job
        let Some((local, domain)) = value.split_once('@') else {
            return Err(ConversionError::InvalidEmail(value));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(ConversionError::InvalidEmail(value));
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only snapshot of an account as returned by the server
///
/// Becomes stale after any server-side mutation that is not echoed back
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: EmailAddress,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    /// Only meaningful for the staff role
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl UserProfile {
    /// Name to show in lists, falls back to the email when no name is set
    pub fn display_label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.email.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("user@example.com", true)]
    #[case::subdomain("ops@mail.example.com", true)]
    #[case::empty("", false)]
    #[case::no_at("user.example.com", false)]
    #[case::missing_local("@example.com", false)]
    #[case::missing_domain("user@", false)]
    fn email_shape_check(#[case] input: &str, #[case] expected_ok: bool) {
        assert_eq!(EmailAddress::try_from(input).is_ok(), expected_ok);
    }
}
