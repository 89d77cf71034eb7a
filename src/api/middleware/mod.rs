//! HTTP middleware.

pub mod error_handler;

pub use error_handler::{PortalError, upstream_status_message};
