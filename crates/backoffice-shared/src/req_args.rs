//! This module stores the expected format of the arguments for the requests
//! The structure of the module is supposed to match the path of the endpoints
//! (with the `/api/v1` prefix collapsed into [`api`]). For example
//! `/api/v1/auth/login-json` maps to [`api::auth::LoginReqArgs`].
//!
//! Password-carrying structs are not serializable on purpose, the client core
//! builds the JSON bodies itself so secrets are only exposed at the last
//! moment.

pub mod api;
