// srf-net/src/lib.rs
pub mod http;
pub mod tool;
pub mod transport;
pub mod validation;
pub mod verify;

// Re-export the public transport surface
pub use http::{build_http_client, DriveFetch, MirrorProbe};
pub use tool::ToolFetch;
pub use transport::{default_strategies, Transport};
pub use validation::validate_url;
pub use verify::verify;
