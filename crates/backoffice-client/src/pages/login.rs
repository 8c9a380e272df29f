use backoffice_shared::{
    account::{
        sanitize_otp, validate_new_password, MessageAck, OtpRequestAck, UserProfile, OTP_LENGTH,
    },
    req_args::api::auth::{ForgotPasswordReqArgs, LoginReqArgs, ResetPasswordOtpReqArgs},
};
use secrecy::{ExposeSecret as _, SecretString};
use tracing::info;

use super::data_state::{poll_in_flight, AwaitingType};
use crate::{
    app::wake_fn,
    ui_helpers::{ui_error_label, ui_password_edit},
    DataShared,
};

/// Full-screen flow shown while there is no session
///
/// Covers login plus the self-service password reset conversation. The email
/// lives in [`DataShared`] so it survives moving between the views.
#[derive(Debug, Default)]
pub struct UiLogin {
    flow: FlowView,
}

#[derive(Debug)]
enum FlowView {
    Login(LoginForm),
    RequestReset(RequestResetForm),
    VerifyReset(VerifyResetForm),
    Success,
}

impl Default for FlowView {
    fn default() -> Self {
        Self::Login(LoginForm::default())
    }
}

#[derive(Debug)]
struct LoginForm {
    password: SecretString,
    error: Option<String>,
    in_flight: Option<AwaitingType<UserProfile>>,
}

#[derive(Debug, Default)]
struct RequestResetForm {
    error: Option<String>,
    in_flight: Option<AwaitingType<OtpRequestAck>>,
}

#[derive(Debug)]
struct VerifyResetForm {
    /// Server acknowledgement from the code request, shown as context
    notice: String,
    /// Code echoed back by dev/test servers so the flow can be exercised
    /// without a mailbox
    dev_otp: Option<String>,
    otp: String,
    new_password: SecretString,
    confirm_password: SecretString,
    error: Option<String>,
    in_flight: Option<AwaitingType<MessageAck>>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            password: SecretString::from(""),
            error: None,
            in_flight: None,
        }
    }
}

impl UiLogin {
    pub fn show(&mut self, ctx: &egui::Context, data_shared: &mut DataShared) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let next = match &mut self.flow {
                    FlowView::Login(form) => form.show(ui, data_shared),
                    FlowView::RequestReset(form) => form.show(ui, data_shared),
                    FlowView::VerifyReset(form) => form.show(ui, data_shared),
                    FlowView::Success => show_success(ui),
                };
                if let Some(next) = next {
                    info!("password flow moving to {next:?}");
                    self.flow = next;
                }
            });
        });
    }
}

impl LoginForm {
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) -> Option<FlowView> {
        ui.heading("Login");

        let email_widget = egui::TextEdit::singleline(&mut data_shared.email).hint_text("Email");
        let mut lost_focus = ui.add(email_widget).lost_focus();
        lost_focus = ui_password_edit(ui, &mut self.password, "Password").lost_focus() || lost_focus;

        if let Some(outcome) = poll_in_flight(&mut self.in_flight) {
            self.apply_outcome(outcome, &mut data_shared.email);
        }
        if self.in_flight.is_some() {
            ui.spinner();
        }
        if let Some(e) = &self.error {
            ui_error_label(ui, e);
        }

        let can_submit = self.can_submit(&data_shared.email);
        if lost_focus && can_submit && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.send_login_attempt(ui, data_shared);
        }
        if ui
            .add_enabled(can_submit, egui::Button::new("Login"))
            .clicked()
        {
            self.send_login_attempt(ui, data_shared);
        }

        if ui.link("Forgot Password?").clicked() {
            return Some(FlowView::RequestReset(RequestResetForm::default()));
        }
        None
    }

    fn can_submit(&self, email: &str) -> bool {
        !email.is_empty() && !self.password.expose_secret().is_empty() && self.in_flight.is_none()
    }

    fn send_login_attempt(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        self.error = None;
        let args = LoginReqArgs::new(data_shared.email.clone(), self.password.clone());
        let rx = data_shared.client.login(args, wake_fn(ui.ctx().clone()));
        self.in_flight = Some(AwaitingType(rx));
    }

    /// Session storage already happened in client-core, only the shared email
    /// needs updating to the canonical value the server returned
    fn apply_outcome(&mut self, outcome: anyhow::Result<UserProfile>, email: &mut String) {
        match outcome {
            Ok(user) => {
                *email = user.email.as_str().to_string();
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl RequestResetForm {
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) -> Option<FlowView> {
        ui.heading("Reset Password");
        ui.label("Enter your email address and we'll send you a one-time code.");

        let email_widget = egui::TextEdit::singleline(&mut data_shared.email).hint_text("Email");
        ui.add(email_widget);

        if let Some(outcome) = poll_in_flight(&mut self.in_flight) {
            if let Some(next) = self.apply_outcome(outcome) {
                return Some(next);
            }
        }
        if self.in_flight.is_some() {
            ui.spinner();
        }
        if let Some(e) = &self.error {
            ui_error_label(ui, e);
        }

        if ui
            .add_enabled(self.in_flight.is_none(), egui::Button::new("Send Code"))
            .clicked()
        {
            if data_shared.email.is_empty() {
                self.error = Some("Email is required".to_string());
            } else {
                self.error = None;
                let args = ForgotPasswordReqArgs {
                    email: data_shared.email.clone(),
                };
                let rx = data_shared.client.request_otp(args, wake_fn(ui.ctx().clone()));
                self.in_flight = Some(AwaitingType(rx));
            }
        }

        if ui.link("Back to Login").clicked() {
            return Some(FlowView::Login(LoginForm::default()));
        }
        None
    }

    fn apply_outcome(&mut self, outcome: anyhow::Result<OtpRequestAck>) -> Option<FlowView> {
        match outcome {
            Ok(ack) => Some(FlowView::VerifyReset(VerifyResetForm::after_request(ack))),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

impl VerifyResetForm {
    /// Only reachable off the back of a successful code request
    fn after_request(ack: OtpRequestAck) -> Self {
        Self {
            notice: ack.message,
            dev_otp: ack.dev_otp,
            otp: String::new(),
            new_password: SecretString::from(""),
            confirm_password: SecretString::from(""),
            error: None,
            in_flight: None,
        }
    }

    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) -> Option<FlowView> {
        ui.heading("Enter Verification Code");
        ui.label(&self.notice);
        if let Some(code) = &self.dev_otp {
            ui.weak(format!("Development code: {code}"));
        }

        let otp_widget = egui::TextEdit::singleline(&mut self.otp).hint_text("6-digit code");
        if ui.add(otp_widget).changed() {
            self.otp = sanitize_otp(&self.otp);
        }
        ui_password_edit(ui, &mut self.new_password, "New Password");
        ui_password_edit(ui, &mut self.confirm_password, "Confirm New Password");

        if let Some(outcome) = poll_in_flight(&mut self.in_flight) {
            if let Some(next) = self.apply_outcome(outcome) {
                return Some(next);
            }
        }
        if self.in_flight.is_some() {
            ui.spinner();
        }
        if let Some(e) = &self.error {
            ui_error_label(ui, e);
        }

        if ui
            .add_enabled(self.in_flight.is_none(), egui::Button::new("Reset Password"))
            .clicked()
        {
            match self.validation_error() {
                Some(e) => self.error = Some(e),
                None => {
                    self.error = None;
                    let args = ResetPasswordOtpReqArgs {
                        email: data_shared.email.clone(),
                        otp: self.otp.clone(),
                        new_password: self.new_password.clone(),
                    };
                    let rx = data_shared
                        .client
                        .reset_password_with_otp(args, wake_fn(ui.ctx().clone()));
                    self.in_flight = Some(AwaitingType(rx));
                }
            }
        }

        if ui.link("Back").clicked() {
            return Some(FlowView::RequestReset(RequestResetForm::default()));
        }
        None
    }

    /// Checks run before any request goes out, in display order
    fn validation_error(&self) -> Option<String> {
        if self.otp.len() != OTP_LENGTH {
            return Some("Please enter the 6-digit code".to_string());
        }
        if let Err(issue) = validate_new_password(&self.new_password, &self.confirm_password) {
            return Some(issue.to_string());
        }
        None
    }

    fn apply_outcome(&mut self, outcome: anyhow::Result<MessageAck>) -> Option<FlowView> {
        match outcome {
            Ok(_) => Some(FlowView::Success),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

fn show_success(ui: &mut egui::Ui) -> Option<FlowView> {
    ui.heading("Password Reset Complete");
    ui.label("Your password has been reset successfully.");
    if ui.button("Return to Login").clicked() {
        // Dropping the old forms clears every buffer from the flow
        return Some(FlowView::Login(LoginForm::default()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use backoffice_shared::account::{AccountStatus, EmailAddress, Role};

    fn sample_user() -> UserProfile {
        UserProfile {
            id: 7.into(),
            email: EmailAddress::try_from("admin@example.com".to_string()).unwrap(),
            name: Some("Admin".to_string()),
            role: Role::admin(),
            status: AccountStatus::active(),
            address: None,
            city: None,
            state: None,
            pincode: None,
            permissions: None,
        }
    }

    #[test]
    fn code_request_success_moves_to_verification_with_the_dev_code() {
        let mut form = RequestResetForm::default();
        let ack = OtpRequestAck {
            message: "OTP sent to your email".to_string(),
            dev_otp: Some("482913".to_string()),
        };

        let next = form.apply_outcome(Ok(ack));

        match next {
            Some(FlowView::VerifyReset(verify)) => {
                assert_eq!(verify.notice, "OTP sent to your email");
                assert_eq!(verify.dev_otp.as_deref(), Some("482913"));
                assert!(verify.otp.is_empty());
                assert!(verify.error.is_none());
            }
            other => panic!("expected move to verification, got {other:?}"),
        }
    }

    #[test]
    fn code_request_failure_stays_put_and_shows_the_server_message() {
        let mut form = RequestResetForm::default();

        let next = form.apply_outcome(Err(anyhow!("Email not found")));

        assert!(next.is_none());
        assert_eq!(form.error.as_deref(), Some("Email not found"));
        assert!(form.in_flight.is_none(), "resubmit must stay possible");
    }

    #[test]
    fn verification_success_moves_to_the_success_screen() {
        let mut form = VerifyResetForm::after_request(OtpRequestAck {
            message: "sent".to_string(),
            dev_otp: None,
        });

        let next = form.apply_outcome(Ok(MessageAck {
            message: "Password reset successful".to_string(),
        }));

        assert!(matches!(next, Some(FlowView::Success)));
    }

    #[test]
    fn verification_failure_keeps_the_form_editable() {
        let mut form = VerifyResetForm::after_request(OtpRequestAck {
            message: "sent".to_string(),
            dev_otp: None,
        });
        form.otp = "482913".to_string();

        let next = form.apply_outcome(Err(anyhow!("Invalid OTP")));

        assert!(next.is_none());
        assert_eq!(form.error.as_deref(), Some("Invalid OTP"));
        assert_eq!(form.otp, "482913", "typed values must survive a failure");
        assert!(form.in_flight.is_none(), "resubmit must stay possible");
    }

    #[test]
    fn verification_guards_run_before_password_checks() {
        let mut form = VerifyResetForm::after_request(OtpRequestAck {
            message: "sent".to_string(),
            dev_otp: None,
        });
        form.otp = "48".to_string(); // incomplete
        form.new_password = SecretString::from("abc");
        form.confirm_password = SecretString::from("xyz");

        assert_eq!(
            form.validation_error().as_deref(),
            Some("Please enter the 6-digit code")
        );

        form.otp = "482913".to_string();
        assert_eq!(
            form.validation_error().as_deref(),
            Some("Password must be at least 6 characters long"),
            "length must be reported before the mismatch"
        );
    }

    #[test]
    fn login_outcome_updates_the_error_field_only_on_failure() {
        let mut form = LoginForm::default();
        let mut email = "ADMIN@example.com".to_string();

        form.apply_outcome(Err(anyhow!("Invalid email or password")), &mut email);
        assert_eq!(form.error.as_deref(), Some("Invalid email or password"));

        form.apply_outcome(Ok(sample_user()), &mut email);
        assert!(form.error.is_none());
        assert_eq!(email, "admin@example.com", "canonical email from the server");
    }
}
