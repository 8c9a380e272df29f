use std::fmt::Debug;

use secrecy::SecretString;

use crate::account::{AccountStatus, Role};

/// Fields accepted by `/api/v1/employees/create` and `/api/v1/auth/register`
///
/// Both endpoints share a body shape, which one to call is decided by the role
/// (admin/staff accounts go through the employees API)
#[derive(Clone)]
pub struct NewUserReqArgs {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
    pub status: AccountStatus,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    /// Only meaningful for the staff role
    pub permissions: Option<Vec<String>>,
}

impl NewUserReqArgs {
    pub fn is_employee(&self) -> bool {
        self.role.is_employee()
    }
}

impl Debug for NewUserReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUserReqArgs")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
