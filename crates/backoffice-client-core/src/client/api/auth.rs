use backoffice_shared::{
    account::{AdminResetOutcome, MessageAck, OtpRequestAck},
    const_config::path::{
        PATH_AUTH_ADMIN_RESET_PASSWORD, PATH_AUTH_FORGOT_PASSWORD, PATH_AUTH_RESET_PASSWORD_OTP,
        PATH_AUTH_RESET_PASSWORD_TOKEN,
    },
    req_args::api::auth::{
        AdminResetPasswordReqArgs, ForgotPasswordReqArgs, ResetPasswordOtpReqArgs,
        ResetPasswordTokenReqArgs,
    },
};
use futures::channel::oneshot;
use secrecy::ExposeSecret as _;

use crate::{client::UiCallBack, Client};

impl Client {
    /// Asks the server to generate and email an OTP for `email`
    #[tracing::instrument(skip(ui_notify))]
    pub fn request_otp<F: UiCallBack>(
        &self,
        args: ForgotPasswordReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<OtpRequestAck>> {
        let body = serde_json::json!({ "email": args.email });
        self.send_request_expect_json(PATH_AUTH_FORGOT_PASSWORD, &body, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn reset_password_with_otp<F: UiCallBack>(
        &self,
        args: ResetPasswordOtpReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageAck>> {
        let body = serde_json::json!({
            "email": args.email,
            "otp": args.otp,
            "new_password": args.new_password.expose_secret(),
        });
        self.send_request_expect_json(PATH_AUTH_RESET_PASSWORD_OTP, &body, ui_notify)
    }

    /// Variant used when the reset link itself carried an opaque token
    #[tracing::instrument(skip(ui_notify))]
    pub fn reset_password_with_token<F: UiCallBack>(
        &self,
        args: ResetPasswordTokenReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageAck>> {
        let body = serde_json::json!({
            "token": args.token,
            "new_password": args.new_password.expose_secret(),
        });
        self.send_request_expect_json(PATH_AUTH_RESET_PASSWORD_TOKEN, &body, ui_notify)
    }

    /// Privileged direct reset of another account's password (no OTP)
    #[tracing::instrument(skip(ui_notify))]
    pub fn admin_reset_password<F: UiCallBack>(
        &self,
        args: AdminResetPasswordReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<AdminResetOutcome>> {
        let body = serde_json::json!({
            "user_id": args.user_id,
            "new_password": args.new_password.expose_secret(),
        });
        self.send_request_expect_json(PATH_AUTH_ADMIN_RESET_PASSWORD, &body, ui_notify)
    }
}
