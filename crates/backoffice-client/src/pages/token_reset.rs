use backoffice_shared::{
    account::{validate_new_password, MessageAck},
    const_config::client::CLIENT_RESET_REDIRECT_DELAY,
    req_args::api::auth::ResetPasswordTokenReqArgs,
};
use backoffice_time::Countdown;
use secrecy::SecretString;

use super::data_state::{poll_in_flight, AwaitingType};
use crate::{
    app::wake_fn,
    ui_helpers::{ui_error_label, ui_password_edit},
    DataShared,
};

/// Full-screen page for resets that arrive with a token (from an emailed
/// link), shown instead of the login flow until it finishes
///
/// Without a token the form stays visible but can never submit, matching a
/// truncated or hand-typed link.
#[derive(Debug)]
pub struct UiTokenReset {
    token: String,
    new_password: SecretString,
    confirm_password: SecretString,
    error: Option<String>,
    in_flight: Option<AwaitingType<MessageAck>>,
    /// Armed on success, sends the user back to login when it fires
    redirect: Option<Countdown>,
    done: bool,
}

impl UiTokenReset {
    pub fn new(token: String) -> Self {
        Self {
            token,
            new_password: SecretString::from(""),
            confirm_password: SecretString::from(""),
            error: None,
            in_flight: None,
            redirect: None,
            done: false,
        }
    }

    /// Once true the caller should drop this page and fall back to login
    pub fn is_finished(&self) -> bool {
        self.done
    }

    pub fn show(&mut self, ctx: &egui::Context, data_shared: &mut DataShared) {
        self.tick();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if self.redirect.is_some() {
                    self.show_success(ui);
                } else {
                    self.show_form(ui, data_shared);
                }
            });
        });
    }

    fn tick(&mut self) {
        if let Some(redirect) = &self.redirect {
            if redirect.is_expired() {
                self.done = true;
            }
        }
    }

    fn show_success(&mut self, ui: &mut egui::Ui) {
        ui.heading("Password Reset Complete");
        ui.label("Your password has been reset successfully.");
        ui.label("Returning to login...");
        if ui.button("Go to Login now").clicked() {
            self.done = true;
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        ui.heading("Set New Password");

        if !self.has_token() {
            ui_error_label(ui, "This reset link is invalid or incomplete.");
        }

        ui_password_edit(ui, &mut self.new_password, "New Password");
        ui_password_edit(ui, &mut self.confirm_password, "Confirm New Password");

        if let Some(outcome) = poll_in_flight(&mut self.in_flight) {
            self.apply_outcome(outcome);
        }
        if self.in_flight.is_some() {
            ui.spinner();
        }
        if let Some(e) = &self.error {
            ui_error_label(ui, e);
        }

        if ui
            .add_enabled(self.can_submit(), egui::Button::new("Reset Password"))
            .clicked()
        {
            match validate_new_password(&self.new_password, &self.confirm_password) {
                Err(issue) => self.error = Some(issue.to_string()),
                Ok(()) => {
                    self.error = None;
                    let args = ResetPasswordTokenReqArgs {
                        token: self.token.clone(),
                        new_password: self.new_password.clone(),
                    };
                    let rx = data_shared
                        .client
                        .reset_password_with_token(args, wake_fn(ui.ctx().clone()));
                    self.in_flight = Some(AwaitingType(rx));
                }
            }
        }

        if ui.link("Back to Login").clicked() {
            self.done = true;
        }
    }

    fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    fn can_submit(&self) -> bool {
        self.has_token() && self.in_flight.is_none()
    }

    fn apply_outcome(&mut self, outcome: anyhow::Result<MessageAck>) {
        match outcome {
            Ok(_) => {
                self.error = None;
                self.redirect = Some(Countdown::new(CLIENT_RESET_REDIRECT_DELAY));
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use backoffice_time::{Seconds, Timestamp};

    #[test]
    fn missing_token_blocks_submission_permanently() {
        let page = UiTokenReset::new(String::new());
        assert!(!page.can_submit());

        let page = UiTokenReset::new("   ".to_string());
        assert!(!page.can_submit(), "whitespace is not a token");

        let page = UiTokenReset::new("tok-abc".to_string());
        assert!(page.can_submit());
    }

    #[test]
    fn success_arms_the_redirect_countdown() {
        let mut page = UiTokenReset::new("tok-abc".to_string());

        page.apply_outcome(Ok(MessageAck {
            message: "Password reset successful".to_string(),
        }));

        assert!(page.redirect.is_some());
        assert!(page.error.is_none());
        assert!(!page.is_finished(), "redirect waits for the countdown");
    }

    #[test]
    fn failure_keeps_the_form_editable() {
        let mut page = UiTokenReset::new("tok-abc".to_string());

        page.apply_outcome(Err(anyhow!("Invalid or expired reset token")));

        assert_eq!(page.error.as_deref(), Some("Invalid or expired reset token"));
        assert!(page.redirect.is_none());
        assert!(page.can_submit(), "resubmit must stay possible");
    }

    #[test]
    fn redirect_finishes_the_page_once_expired() {
        let mut page = UiTokenReset::new("tok-abc".to_string());
        // Armed far enough in the past to already be expired
        page.redirect = Some(Countdown::starting_at(Timestamp::from(0u32), Seconds::new(3)));

        page.tick();

        assert!(page.is_finished());
    }
}
