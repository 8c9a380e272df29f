use backoffice_shared::{
    account::{matches_user_query, validate_new_password, AdminResetOutcome, UserProfile},
    const_config::client::CLIENT_SUCCESS_DISMISS_DELAY,
    req_args::api::auth::AdminResetPasswordReqArgs,
};
use backoffice_time::Countdown;
use egui::Button;
use egui_extras::{Column, TableBuilder};
use secrecy::SecretString;

use super::{
    data_state::{poll_in_flight, AwaitingType, DataState},
    DisplayablePage, PageAccess,
};
use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{get_text_height, ui_error_label, ui_password_edit},
};

/// Admin-assisted password reset for employee accounts
///
/// The candidate pool merges the employee list with any back-office roles
/// found among the registered users, since older accounts predate the
/// employees table.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiPasswordReset {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    employees: DataState<Vec<UserProfile>>,
    #[serde(skip)]
    registered: DataState<Vec<UserProfile>>,
    #[serde(skip)]
    search_query: String,
    #[serde(skip)]
    selected: Option<UserProfile>,
    #[serde(skip)]
    new_password: SecretString,
    #[serde(skip)]
    confirm_password: SecretString,
    #[serde(skip)]
    error: Option<String>,
    #[serde(skip)]
    in_flight: Option<AwaitingType<AdminResetOutcome>>,
    #[serde(skip)]
    success: Option<SuccessBanner>,
}

#[derive(Debug)]
struct SuccessBanner {
    message: String,
    dismiss: Countdown,
}

impl Default for UiPasswordReset {
    fn default() -> Self {
        Self {
            is_open: Default::default(),
            page_unique_number: Default::default(),
            should_refresh: Default::default(),
            employees: Default::default(),
            registered: Default::default(),
            search_query: Default::default(),
            selected: Default::default(),
            new_password: SecretString::from(""),
            confirm_password: SecretString::from(""),
            error: Default::default(),
            in_flight: Default::default(),
            success: Default::default(),
        }
    }
}

impl DisplayablePage for UiPasswordReset {
    displayable_page_common!("Password Reset", PageAccess::AdminOnly);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.employees = Default::default();
        self.registered = Default::default();
        self.search_query = Default::default();
        self.selected = Default::default();
        self.new_password = SecretString::from("");
        self.confirm_password = SecretString::from("");
        self.error = Default::default();
        self.in_flight = Default::default();
        self.success = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }
        self.tick();

        let (DataState::Present(employees), DataState::Present(registered)) =
            (&self.employees, &self.registered)
        else {
            let ctx = ui.ctx().clone();
            if !self.employees.is_present() {
                self.employees.get(Some(ui), None, || {
                    AwaitingType(data_shared.client.list_employees(wake_fn(ctx.clone())))
                });
            }
            if !self.registered.is_present() {
                let ctx = ui.ctx().clone();
                self.registered.get(Some(ui), None, || {
                    AwaitingType(data_shared.client.list_registered_users(wake_fn(ctx)))
                });
            }
            return;
        };
        // Clones keep the borrow checker happy while the form mutates self
        let employees = employees.clone();
        let registered = registered.clone();

        if let Some(outcome) = poll_in_flight(&mut self.in_flight) {
            self.apply_reset_outcome(outcome);
        }

        if let Some(banner) = &self.success {
            ui.colored_label(egui::Color32::DARK_GREEN, &banner.message);
            ui.separator();
        }

        ui.horizontal(|ui| {
            if ui.button("Refresh").clicked() {
                self.should_refresh = true;
            }
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.search_query);
        });
        ui.separator();

        let pool: Vec<UserProfile> = employee_pool(&employees, &registered, &self.search_query)
            .into_iter()
            .cloned()
            .collect();
        self.ui_show_candidates(ui, &pool);

        ui.separator();
        self.ui_show_reset_form(ui, data_shared);
    }
}

impl UiPasswordReset {
    fn tick(&mut self) {
        if let Some(banner) = &self.success {
            if banner.dismiss.is_expired() {
                self.success = None;
            }
        }
    }

    fn ui_show_candidates(&mut self, ui: &mut egui::Ui, pool: &[UserProfile]) {
        if pool.is_empty() {
            ui.label("No matching employee accounts");
            return;
        }
        let text_height = get_text_height(ui);
        let table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::LEFT))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .min_scrolled_height(0.0)
            .sense(egui::Sense::click())
            .header(text_height, |mut header| {
                header.col(|ui| {
                    ui.strong("Email");
                });
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("Role");
                });
            });

        table.body(|body| {
            body.rows(text_height, pool.len(), |mut row| {
                let user = &pool[row.index()];
                let is_selected = self
                    .selected
                    .as_ref()
                    .is_some_and(|selected| selected.id == user.id);
                row.set_selected(is_selected);
                row.col(|ui| {
                    ui.label(user.email.as_str());
                });
                row.col(|ui| {
                    ui.label(user.name.as_deref().unwrap_or("-"));
                });
                row.col(|ui| {
                    ui.label(user.role.as_str());
                });
                if row.response().clicked() {
                    self.selected = Some(user.clone());
                    self.error = None;
                    self.success = None;
                }
            });
        });
    }

    fn ui_show_reset_form(&mut self, ui: &mut egui::Ui, data_shared: &mut crate::DataShared) {
        let Some(selected) = self.selected.clone() else {
            ui.label("[NO ACCOUNT SELECTED]");
            return;
        };
        ui.label(format!("Resetting password for {}", selected.display_label()));

        ui_password_edit(ui, &mut self.new_password, "New Password");
        ui_password_edit(ui, &mut self.confirm_password, "Confirm New Password");

        if self.in_flight.is_some() {
            ui.spinner();
        }
        if let Some(e) = &self.error {
            ui_error_label(ui, e);
        }

        if ui
            .add_enabled(self.in_flight.is_none(), Button::new("Reset Password"))
            .clicked()
        {
            match validate_new_password(&self.new_password, &self.confirm_password) {
                Err(issue) => self.error = Some(issue.to_string()),
                Ok(()) => {
                    self.error = None;
                    let args = AdminResetPasswordReqArgs {
                        user_id: selected.id,
                        new_password: self.new_password.clone(),
                    };
                    let rx = data_shared
                        .client
                        .admin_reset_password(args, wake_fn(ui.ctx().clone()));
                    self.in_flight = Some(AwaitingType(rx));
                }
            }
        }
    }

    fn apply_reset_outcome(&mut self, outcome: anyhow::Result<AdminResetOutcome>) {
        match outcome {
            Ok(outcome) => {
                self.success = Some(SuccessBanner {
                    message: format!(
                        "Password for {} has been reset successfully!",
                        outcome.email
                    ),
                    dismiss: Countdown::new(CLIENT_SUCCESS_DISMISS_DELAY),
                });
                self.selected = None;
                self.search_query.clear();
                self.new_password = SecretString::from("");
                self.confirm_password = SecretString::from("");
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// Merges both account lists down to the employee accounts matching `query`
fn employee_pool<'a>(
    employees: &'a [UserProfile],
    registered: &'a [UserProfile],
    query: &str,
) -> Vec<&'a UserProfile> {
    employees
        .iter()
        .chain(registered.iter())
        .filter(|user| user.role.is_employee())
        .filter(|user| matches_user_query(user, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use backoffice_shared::account::{AccountStatus, EmailAddress, Role};
    use backoffice_time::{Seconds, Timestamp};

    fn user(id: u64, email: &str, name: &str, role: Role) -> UserProfile {
        UserProfile {
            id: id.into(),
            email: EmailAddress::try_from(email.to_string()).unwrap(),
            name: Some(name.to_string()),
            role,
            status: AccountStatus::active(),
            address: None,
            city: None,
            state: None,
            pincode: None,
            permissions: None,
        }
    }

    #[test]
    fn pool_merges_both_lists_and_drops_non_employees() {
        let employees = vec![user(1, "admin@example.com", "Admin", Role::admin())];
        let registered = vec![
            user(2, "staff@example.com", "Legacy Staff", Role::staff()),
            user(3, "shopper@example.com", "Shopper", Role::customer()),
        ];

        let pool = employee_pool(&employees, &registered, "");

        let emails: Vec<&str> = pool.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["admin@example.com", "staff@example.com"]);
    }

    #[test]
    fn pool_respects_the_search_query() {
        let employees = vec![
            user(1, "admin@example.com", "Admin", Role::admin()),
            user(2, "staff@example.com", "Pat", Role::staff()),
        ];

        let pool = employee_pool(&employees, &[], "pat");

        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].email.as_str(), "staff@example.com");
    }

    #[test]
    fn reset_success_shows_the_banner_and_clears_the_form() {
        let mut page = UiPasswordReset::default();
        page.selected = Some(user(5, "staff@example.com", "Pat", Role::staff()));
        page.search_query = "pat".to_string();
        page.new_password = SecretString::from("secret1");
        page.error = Some("stale".to_string());

        page.apply_reset_outcome(Ok(AdminResetOutcome {
            message: "Password reset successful".to_string(),
            user_id: 5u64.into(),
            email: EmailAddress::try_from("staff@example.com").unwrap(),
            password_updated: true,
        }));

        let banner = page.success.as_ref().expect("banner expected");
        assert_eq!(
            banner.message,
            "Password for staff@example.com has been reset successfully!"
        );
        assert!(page.selected.is_none());
        assert!(page.search_query.is_empty());
        assert!(page.error.is_none());
    }

    #[test]
    fn reset_failure_keeps_the_selection() {
        let mut page = UiPasswordReset::default();
        page.selected = Some(user(5, "staff@example.com", "Pat", Role::staff()));

        page.apply_reset_outcome(Err(anyhow!("Cannot reset password for admin users")));

        assert_eq!(
            page.error.as_deref(),
            Some("Cannot reset password for admin users")
        );
        assert!(page.selected.is_some(), "selection must survive a failure");
        assert!(page.success.is_none());
    }

    #[test]
    fn banner_dismisses_once_the_countdown_expires() {
        let mut page = UiPasswordReset::default();
        page.success = Some(SuccessBanner {
            message: "done".to_string(),
            dismiss: Countdown::starting_at(Timestamp::from(0u32), Seconds::new(5)),
        });

        page.tick();

        assert!(page.success.is_none());
    }
}
