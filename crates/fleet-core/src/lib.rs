//! Fleet Core Library
//!
//! Domain logic for the fleet CLI: resource selectors, release
//! disambiguation, tag operations and the remote API client.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod release;
pub mod resource;
pub mod tag;
