use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Role tag as issued by the server
///
/// The server owns the tag set so this stays an open string wrapper instead of
/// an enum, unknown tags simply fail the employee checks below
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn admin() -> Self {
        Self::new("admin")
    }

    pub fn staff() -> Self {
        Self::new("staff")
    }

    pub fn b2b() -> Self {
        Self::new("b2b")
    }

    /// B2C website customers are stored with the plain "user" tag
    pub fn customer() -> Self {
        Self::new("user")
    }

    /// The tags offered by the create-user form
    pub fn selectable() -> [Role; 4] {
        [Self::admin(), Self::staff(), Self::b2b(), Self::customer()]
    }

    pub fn is_admin(&self) -> bool {
        self.0 == "admin"
    }

    /// Back-office operators, the subset managed through the employees API
    pub fn is_employee(&self) -> bool {
        matches!(self.0.as_str(), "admin" | "staff")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AccountStatus(String);

impl AccountStatus {
    pub fn active() -> Self {
        Self("active".to_string())
    }

    pub fn is_active(&self) -> bool {
        self.0.eq_ignore_ascii_case("active")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_check_covers_admin_and_staff_only() {
        assert!(Role::admin().is_employee());
        assert!(Role::staff().is_employee());
        assert!(!Role::b2b().is_employee());
        assert!(!Role::customer().is_employee());
        assert!(!Role::new("super_admin").is_employee());
    }
}
