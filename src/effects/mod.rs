//! Effectful auth operations using Stillwater 0.11.0.
//!
//! This module is the "imperative shell" around the pure session core.
//! It talks to the auth service through the effect environment and turns
//! the outcome into session events for the store.
//!
//! # Key Concepts
//!
//! - **AuthService**: the environment that performs profile fetch and logout
//! - **Effects**: `fetch_profile` and `logout` describe the calls without
//!   running them
//! - **Store integration**: `SessionStore::run_profile_fetch` and
//!   `SessionStore::run_logout` raise the events around each call

mod auth;
mod error;

pub use auth::{fetch_profile, logout, AuthService};
pub use error::AuthError;
