//! HTTP layer: route handlers, middleware and route registration.

pub mod constants;
pub mod middleware;
pub mod services;

pub use services::{RouteSettings, configure_routes};
