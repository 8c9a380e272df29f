use std::fmt::Debug;

use secrecy::{ExposeSecret as _, SecretString};

use crate::id::UserId;

#[derive(Clone)]
pub struct LoginReqArgs {
    pub email: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(email: S, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ForgotPasswordReqArgs {
    pub email: String,
}

#[derive(Clone)]
pub struct ResetPasswordOtpReqArgs {
    pub email: String,
    pub otp: String,
    pub new_password: SecretString,
}

impl Debug for ResetPasswordOtpReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordOtpReqArgs")
            .field("email", &self.email)
            .field("otp", &self.otp)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ResetPasswordTokenReqArgs {
    pub token: String,
    pub new_password: SecretString,
}

impl Debug for ResetPasswordTokenReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token itself is a credential, only show that it is present
        f.debug_struct("ResetPasswordTokenReqArgs")
            .field("has_token", &!self.token.is_empty())
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct AdminResetPasswordReqArgs {
    pub user_id: UserId,
    pub new_password: SecretString,
}

impl Debug for AdminResetPasswordReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminResetPasswordReqArgs")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
