//! Client-side validation rules for credential forms
//!
//! These checks run before any network call is made and their order is part of
//! the contract: the length check always wins over the mismatch check.

use secrecy::{ExposeSecret as _, SecretString};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const OTP_LENGTH: usize = 6;

use crate::account::UserProfile;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PasswordIssue {
    #[error("Password must be at least 6 characters long")]
    TooShort,
    #[error("Passwords do not match")]
    Mismatch,
}

/// Checks a new password and its confirmation, length before match
pub fn validate_new_password(
    new_password: &SecretString,
    confirm_password: &SecretString,
) -> Result<(), PasswordIssue> {
    if new_password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordIssue::TooShort);
    }
    if new_password.expose_secret() != confirm_password.expose_secret() {
        return Err(PasswordIssue::Mismatch);
    }
    Ok(())
}

/// Keeps only digits and truncates to [`OTP_LENGTH`]
///
/// Applied on every edit of the OTP input buffer so non digit characters are
/// silently dropped rather than rejected. Idempotent.
pub fn sanitize_otp(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(OTP_LENGTH)
        .collect()
}

/// Case-insensitive substring match over email and name
///
/// An empty (or whitespace only) query matches everything
pub fn matches_user_query(user: &UserProfile, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    if user.email.as_str().to_lowercase().contains(&query) {
        return true;
    }
    user.name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(&query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountStatus, Role};
    use rstest::rstest;

    fn password(s: &str) -> SecretString {
        s.to_string().into()
    }

    #[rstest]
    #[case::ok("secret1", "secret1", Ok(()))]
    #[case::too_short("abc", "abc", Err(PasswordIssue::TooShort))]
    #[case::mismatch("secret1", "secret2", Err(PasswordIssue::Mismatch))]
    // Both conditions hold, the length message must win
    #[case::short_and_mismatched("abc", "abcdef", Err(PasswordIssue::TooShort))]
    #[case::boundary("sixsix", "sixsix", Ok(()))]
    fn password_validation_order(
        #[case] new: &str,
        #[case] confirm: &str,
        #[case] expected: Result<(), PasswordIssue>,
    ) {
        assert_eq!(validate_new_password(&password(new), &password(confirm)), expected);
    }

    #[rstest]
    #[case("12a3456", "123456")]
    #[case("123456", "123456")]
    #[case("12345678", "123456")]
    #[case("no digits", "")]
    #[case("", "")]
    fn otp_sanitization(#[case] input: &str, #[case] expected: &str) {
        let once = sanitize_otp(input);
        assert_eq!(once, expected);
        // Re-applying the transform must be a no-op
        assert_eq!(sanitize_otp(&once), expected);
    }

    fn sample_user(email: &str, name: Option<&str>) -> UserProfile {
        UserProfile {
            id: 1u64.into(),
            email: email.try_into().unwrap(),
            name: name.map(str::to_string),
            role: Role::staff(),
            status: AccountStatus::active(),
            address: None,
            city: None,
            state: None,
            pincode: None,
            permissions: None,
        }
    }

    #[rstest]
    #[case::empty_query_matches("", true)]
    #[case::email_substring("ops@", true)]
    #[case::email_case_insensitive("OPS@EXAMPLE", true)]
    #[case::name_substring("jam", true)]
    #[case::name_case_insensitive("JAMIE", true)]
    #[case::no_match("nobody", false)]
    fn user_query_filter(#[case] query: &str, #[case] expected: bool) {
        let user = sample_user("ops@example.com", Some("Jamie Ops"));
        assert_eq!(matches_user_query(&user, query), expected);
    }

    #[test]
    fn user_query_filter_without_name() {
        let user = sample_user("ops@example.com", None);
        assert!(matches_user_query(&user, "example"));
        assert!(!matches_user_query(&user, "jamie"));
    }
}
