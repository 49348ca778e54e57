//! Logger module
//!
//! Console logging for the HTTP server:
//! - Server lifecycle logging
//! - Access logging (common/combined formats)
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("SPA static server started");
    println!("Server running at: http://{addr}/");
    println!("Serving directory: {}", config.spa.root_dir);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Press Ctrl+C to stop");
    println!("======================================\n");
}

pub fn log_shutdown(addr: &SocketAddr) {
    println!("\n[Shutdown] Stopped listening on {addr}");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}
