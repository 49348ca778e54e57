// Handler module entry point
// Request routing and static file serving

pub mod router;
pub mod static_files;

pub use router::handle_request;
