pub mod client;
pub mod handler;
pub mod modifier;
pub mod response;
pub mod spec;
pub mod types;

// Re-export commonly used types for convenient access
pub use client::Client;
pub use handler::{HandlerOption, RequestHandler};
pub use modifier::{CONTENT_TYPE_JSON, RequestModifier, ResponseBodyModifier, ResponseModifier};
pub use response::Response;
pub use spec::{DEFAULT_URL, Spec, SpecBuilder, SpecOption};
pub use types::Status;
