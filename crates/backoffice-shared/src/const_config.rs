//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    use backoffice_time::Seconds;

    /// Fallback when neither the CLI nor the environment names a server
    pub const CLIENT_DEFAULT_SERVER_URL: &str = "http://localhost:8001";
    /// How long the admin-reset success banner stays up without user action
    pub const CLIENT_SUCCESS_DISMISS_DELAY: Seconds = Seconds::new(5);
    /// Delay before the token-reset success screen returns to login
    pub const CLIENT_RESET_REDIRECT_DELAY: Seconds = Seconds::new(3);
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;

    pub const PATH_AUTH_LOGIN: PathSpec = PathSpec::post("/api/v1/auth/login-json");
    pub const PATH_AUTH_ME: PathSpec = PathSpec::get("/api/v1/auth/me");
    pub const PATH_AUTH_USERS: PathSpec = PathSpec::get("/api/v1/auth/users");
    pub const PATH_AUTH_REGISTER: PathSpec = PathSpec::post("/api/v1/auth/register");
    pub const PATH_AUTH_ADMIN_RESET_PASSWORD: PathSpec =
        PathSpec::post("/api/v1/auth/admin/reset-password");
    pub const PATH_AUTH_FORGOT_PASSWORD: PathSpec = PathSpec::post("/api/v1/auth/forgot-password");
    pub const PATH_AUTH_RESET_PASSWORD_OTP: PathSpec =
        PathSpec::post("/api/v1/auth/reset-password-otp");
    pub const PATH_AUTH_RESET_PASSWORD_TOKEN: PathSpec =
        PathSpec::post("/api/v1/auth/reset-password");
    pub const PATH_EMPLOYEES: PathSpec = PathSpec::get("/api/v1/employees");
    pub const PATH_EMPLOYEES_CREATE: PathSpec = PathSpec::post("/api/v1/employees/create");
    pub const PATH_PRODUCTS: PathSpec = PathSpec::get("/api/v1/products");
    pub const PATH_PRODUCTS_CREATE: PathSpec = PathSpec::post("/api/v1/products");
    /// Base for the per-product update/delete paths, the id gets appended
    pub const PATH_PRODUCTS_ITEM_BASE: &str = "/api/v1/products";
    pub const PATH_PRODUCTS_IMPORT: PathSpec = PathSpec::post("/api/v1/products/import");
}

#[cfg(test)]
mod tests {
    use super::path::*;

    #[test]
    fn all_paths_are_versioned_and_absolute() {
        let paths = [
            PATH_AUTH_LOGIN,
            PATH_AUTH_ME,
            PATH_AUTH_USERS,
            PATH_AUTH_REGISTER,
            PATH_AUTH_ADMIN_RESET_PASSWORD,
            PATH_AUTH_FORGOT_PASSWORD,
            PATH_AUTH_RESET_PASSWORD_OTP,
            PATH_AUTH_RESET_PASSWORD_TOKEN,
            PATH_EMPLOYEES,
            PATH_EMPLOYEES_CREATE,
            PATH_PRODUCTS,
            PATH_PRODUCTS_CREATE,
            PATH_PRODUCTS_IMPORT,
        ];
        for spec in paths {
            assert!(
                spec.path.starts_with("/api/v1/"),
                "unexpected path: {}",
                spec.path
            );
        }
        assert!(PATH_PRODUCTS_ITEM_BASE.starts_with("/api/v1/"));
    }
}
