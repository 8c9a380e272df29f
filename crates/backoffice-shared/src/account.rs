//! Shared items related to user accounts and credentials

mod responses;
mod role;
mod user;
mod validate;

pub use responses::{AdminResetOutcome, LoginResponse, MessageAck, OtpRequestAck};
pub use role::{AccountStatus, Role};
pub use user::{EmailAddress, UserProfile};
pub use validate::{
    matches_user_query, sanitize_otp, validate_new_password, PasswordIssue, MIN_PASSWORD_LENGTH,
    OTP_LENGTH,
};
