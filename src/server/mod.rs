// Server module entry point
// Listener creation, accept loop, connection handling, and signals

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exported as server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used functions
pub use listener::create_listener;
pub use server_loop::start_server_loop;
