//! Per-endpoint methods on [`Client`], grouped to mirror the server's modules

use backoffice_shared::{account::UserProfile, const_config::path::PATH_AUTH_ME};
use futures::channel::oneshot;

use crate::{
    client::{UiCallBack, DUMMY_ARGUMENT},
    Client,
};

pub mod auth;
pub mod products;
pub mod users;

impl Client {
    /// Fetches the profile belonging to the current bearer token
    ///
    /// Does not touch the stored session (login/logout are its only writers),
    /// callers use a failure here to detect a stale token and log out
    #[tracing::instrument(skip(ui_notify))]
    pub fn current_user<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(PATH_AUTH_ME, &DUMMY_ARGUMENT, ui_notify)
    }
}
