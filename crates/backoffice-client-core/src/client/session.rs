use std::fmt::Debug;

use backoffice_shared::account::UserProfile;

/// Authenticated session: bearer token plus the profile returned with it
///
/// Created/overwritten whole on login, cleared whole on logout, never
/// partially updated. Serializable so the app shell can persist it across
/// restarts.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token is a credential, only show that it is present
        f.debug_struct("Session")
            .field("has_token", &!self.token.is_empty())
            .field("user", &self.user)
            .finish()
    }
}
