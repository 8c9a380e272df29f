use backoffice_shared::{
    account::UserProfile,
    const_config::path::{PATH_AUTH_REGISTER, PATH_AUTH_USERS, PATH_EMPLOYEES, PATH_EMPLOYEES_CREATE},
    req_args::api::employees::NewUserReqArgs,
};
use futures::channel::oneshot;
use secrecy::ExposeSecret as _;

use crate::{
    client::{UiCallBack, DUMMY_ARGUMENT},
    Client,
};

impl Client {
    /// Back-office accounts (roles admin/staff)
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_employees<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<UserProfile>>> {
        self.send_request_expect_json(PATH_EMPLOYEES, &DUMMY_ARGUMENT, ui_notify)
    }

    /// Accounts registered through the storefront
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_registered_users<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<UserProfile>>> {
        self.send_request_expect_json(PATH_AUTH_USERS, &DUMMY_ARGUMENT, ui_notify)
    }

    /// Creates an account, routed by role: employees go through the
    /// employees API, everyone else through customer registration
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_user<F: UiCallBack>(
        &self,
        args: NewUserReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        let path_spec = if args.is_employee() {
            PATH_EMPLOYEES_CREATE
        } else {
            PATH_AUTH_REGISTER
        };
        let body = serde_json::json!({
            "name": args.name,
            "email": args.email,
            "password": args.password.expose_secret(),
            "role": args.role,
            "status": args.status,
            "address": args.address,
            "city": args.city,
            "state": args.state,
            "pincode": args.pincode,
            "permissions": args.permissions,
        });
        self.send_request_expect_json(path_spec, &body, ui_notify)
    }
}
