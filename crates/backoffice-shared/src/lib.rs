//! Code shared between the API gateway layer and the UI pages

#![warn(unused_crate_dependencies)]

pub mod account;
pub mod const_config;
pub mod errors;
pub mod id;
pub mod product;
pub mod req_args;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
