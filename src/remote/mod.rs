//! Remote Layer
//!
//! Client for the hosted relational store's REST interface. One shared
//! bearer credential, no per-user scoping.

mod config;
mod rest;

pub use config::RemoteConfig;
pub use rest::{RemoteError, RestClient};
