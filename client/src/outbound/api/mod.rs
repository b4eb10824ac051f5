//! Backend API adapter: configuration, endpoint resolution, and the
//! reqwest-backed resource client.

pub mod client;
pub mod config;
pub mod endpoints;

pub use self::client::ResourceClient;
pub use self::config::{ApiConfig, ApiConfigError, ApiSettings};
pub use self::endpoints::{EndpointError, HttpMethod, ListFilter, RequestDescriptor};
