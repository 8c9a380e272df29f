//! Stores the functionality common between the admin client front ends
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]

#[cfg(target_arch = "wasm32")]
mod suppress_wasm_warnings {
    // Needed because we need to enable the js feature on this crate
    use getrandom as _;
}

mod client;

pub use client::{Client, Session, UiCallBack, DUMMY_ARGUMENT};
