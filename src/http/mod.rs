//! HTTP protocol layer module
//!
//! Response builders and MIME detection, decoupled from the request
//! handling logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_405_response, build_500_response, build_file_response, build_options_response,
};
