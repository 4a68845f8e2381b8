//! # TokenGate API
//!
//! HTTP layer: the request gate that resolves bearer tokens, the access
//! guard that enforces the route policy, and the login/logout endpoints.

pub mod app;
pub mod bootstrap;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
