pub mod auth;
pub mod employees;
