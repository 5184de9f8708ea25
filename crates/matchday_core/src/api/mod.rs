//! JSON boundary for embedders.
//!
//! Engine bindings and RPC shims talk to the roster engine through the
//! string-in/string-out functions here so they never need to mirror the
//! Rust types on their side of the fence.

pub mod roster_json;

pub use roster_json::{
    cancel_json, cancel_reserve_json, register_json, roster_view_json, status_json,
};
pub use roster_json::{
    CancelReserveResponse, CancelResponse, RegisterResponse, RosterRequest, RosterViewRequest,
    RosterViewResponse, StatusResponse,
};
