//! SPA static asset server
//!
//! Serves files from a fixed root directory over HTTP. Request paths that
//! do not resolve to an existing file are answered with the index document
//! (status 200) so a client-side router can interpret the route.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
