//! tradebook-client: HTTP/JSON implementations of the collaborator
//! contracts defined in `tradebook-core`, plus configuration loading and
//! tracing setup for the applications that embed them.

pub mod api;
pub mod config;
pub mod telemetry;

pub use api::ApiClient;
pub use config::Config;
