use backoffice_shared::{
    account::{
        matches_user_query, AccountStatus, EmailAddress, Role, UserProfile, MIN_PASSWORD_LENGTH,
    },
    req_args::api::employees::NewUserReqArgs,
};
use egui::Button;
use egui_extras::{Column, TableBuilder};
use secrecy::{ExposeSecret as _, SecretString};

use super::{
    data_state::{poll_in_flight, AwaitingType, DataState},
    DisplayablePage, PageAccess,
};
use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{get_text_height, ui_error_label, ui_escape_button, ui_password_edit},
};

/// Account administration, employee and storefront accounts side by side
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiUsers {
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
    user_op: UserOp,
}

#[derive(Debug, Default)]
enum UserOp {
    #[default]
    None,
    New(NewUserForm),
}

#[derive(Debug)]
struct NewUserForm {
    name: String,
    email: String,
    password: SecretString,
    role: Role,
    address: String,
    city: String,
    state: String,
    pincode: String,
    error: Option<String>,
    in_flight: Option<AwaitingType<UserProfile>>,
}

impl NewUserForm {
    fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: SecretString::from(""),
            role: Role::staff(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            error: None,
            in_flight: None,
        }
    }

    /// First problem found, in display order, or None when ready to send
    fn validation_error(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name is required".to_string());
        }
        if let Err(e) = EmailAddress::try_from(self.email.clone()) {
            return Some(e.to_string());
        }
        if self.password.expose_secret().len() < MIN_PASSWORD_LENGTH {
            return Some("Password must be at least 6 characters long".to_string());
        }
        None
    }

    fn to_req_args(&self) -> NewUserReqArgs {
        let opt = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        NewUserReqArgs {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role.clone(),
            status: AccountStatus::active(),
            address: opt(&self.address),
            city: opt(&self.city),
            state: opt(&self.state),
            pincode: opt(&self.pincode),
            permissions: None,
        }
    }
}

impl DisplayablePage for UiUsers {
    displayable_page_common!("Users", PageAccess::AdminOnly);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.employees = Default::default();
        self.registered = Default::default();
        self.search_query = Default::default();
        self.user_op = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }

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
        let employees = employees.clone();
        let registered = registered.clone();

        if let UserOp::New(form) = &mut self.user_op {
            if ui_show_new_user(ui, form, data_shared) == OpResult::ResetPage {
                self.should_refresh = true;
            }
            ui.separator();
        }

        ui.horizontal(|ui| {
            if ui.button("Refresh").clicked() {
                self.should_refresh = true;
            }
            if matches!(self.user_op, UserOp::None) && ui.button("Add New User").clicked() {
                self.user_op = UserOp::New(NewUserForm::new());
            }
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.search_query);
        });
        ui.separator();

        let users: Vec<&UserProfile> = merged_users(&employees, &registered, &self.search_query);
        ui_show_user_list(ui, &users);
    }
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
enum OpResult {
    NoAction,
    ResetPage,
}

fn ui_show_new_user(
    ui: &mut egui::Ui,
    form: &mut NewUserForm,
    data_shared: &mut crate::DataShared,
) -> OpResult {
    if let Some(outcome) = poll_in_flight(&mut form.in_flight) {
        match outcome {
            Ok(user) => {
                tracing::info!("created account {}", user.email);
                return OpResult::ResetPage;
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    egui::Grid::new("New User Grid").num_columns(2).show(ui, |ui| {
        ui.label("Name");
        ui.text_edit_singleline(&mut form.name);
        ui.end_row();

        ui.label("Email");
        ui.text_edit_singleline(&mut form.email);
        ui.end_row();

        ui.label("Password");
        ui_password_edit(ui, &mut form.password, "At least 6 characters");
        ui.end_row();

        ui.label("Role");
        egui::ComboBox::from_id_salt("new user role")
            .selected_text(form.role.as_str())
            .show_ui(ui, |ui| {
                for role in Role::selectable() {
                    let label = role.as_str().to_string();
                    ui.selectable_value(&mut form.role, role, label);
                }
            });
        ui.end_row();

        ui.label("Address");
        ui.text_edit_singleline(&mut form.address);
        ui.end_row();

        ui.label("City");
        ui.text_edit_singleline(&mut form.city);
        ui.end_row();

        ui.label("State");
        ui.text_edit_singleline(&mut form.state);
        ui.end_row();

        ui.label("Pincode");
        ui.text_edit_singleline(&mut form.pincode);
        ui.end_row();
    });

    if form.in_flight.is_some() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Saving...");
        });
    }
    if let Some(e) = &form.error {
        ui_error_label(ui, e);
    }

    if ui
        .add_enabled(form.in_flight.is_none(), Button::new("Save New User"))
        .clicked()
    {
        match form.validation_error() {
            Some(e) => form.error = Some(e),
            None => {
                form.error = None;
                let rx = data_shared
                    .client
                    .create_user(form.to_req_args(), wake_fn(ui.ctx().clone()));
                form.in_flight = Some(AwaitingType(rx));
            }
        }
    }

    if ui_escape_button(ui, "Cancel") {
        return OpResult::ResetPage;
    }

    OpResult::NoAction
}

fn ui_show_user_list(ui: &mut egui::Ui, users: &[&UserProfile]) {
    if users.is_empty() {
        ui.label("No matching accounts");
        return;
    }
    let text_height = get_text_height(ui);
    let table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::LEFT))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .min_scrolled_height(0.0)
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
            header.col(|ui| {
                ui.strong("Status");
            });
        });

    table.body(|body| {
        body.rows(text_height, users.len(), |mut row| {
            let user = users[row.index()];
            row.col(|ui| {
                ui.label(user.email.as_str());
            });
            row.col(|ui| {
                ui.label(user.name.as_deref().unwrap_or("-"));
            });
            row.col(|ui| {
                ui.label(user.role.as_str());
            });
            row.col(|ui| {
                ui.label(user.status.as_str());
            });
        });
    });
}

/// Both lists merged, employees first, filtered by `query`
fn merged_users<'a>(
    employees: &'a [UserProfile],
    registered: &'a [UserProfile],
    query: &str,
) -> Vec<&'a UserProfile> {
    employees
        .iter()
        .chain(registered.iter())
        .filter(|user| matches_user_query(user, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_shared::account::AccountStatus;

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
    fn merged_list_keeps_every_role_and_applies_the_filter() {
        let employees = vec![user(1, "admin@example.com", "Admin", Role::admin())];
        let registered = vec![
            user(2, "shopper@example.com", "Shopper", Role::customer()),
            user(3, "bulk@example.com", "Bulk Buyer", Role::b2b()),
        ];

        let all = merged_users(&employees, &registered, "");
        assert_eq!(all.len(), 3);

        let filtered = merged_users(&employees, &registered, "shopper");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].email.as_str(), "shopper@example.com");
    }

    #[test]
    fn form_validation_reports_problems_in_display_order() {
        let mut form = NewUserForm::new();
        assert_eq!(form.validation_error().as_deref(), Some("Name is required"));

        form.name = "Pat".to_string();
        form.email = "not-an-email".to_string();
        assert!(form.validation_error().is_some(), "bad email must be caught");

        form.email = "pat@example.com".to_string();
        form.password = SecretString::from("abc");
        assert_eq!(
            form.validation_error().as_deref(),
            Some("Password must be at least 6 characters long")
        );

        form.password = SecretString::from("secret1");
        assert!(form.validation_error().is_none());
    }

    #[test]
    fn employee_roles_route_to_the_employees_api() {
        let mut form = NewUserForm::new();
        form.name = "Pat".to_string();
        form.email = "pat@example.com".to_string();
        form.password = SecretString::from("secret1");

        form.role = Role::staff();
        assert!(form.to_req_args().is_employee());

        form.role = Role::customer();
        assert!(!form.to_req_args().is_employee());
    }
}
