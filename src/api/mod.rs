//! HTTP layer: routes, handlers, context assembly, and error mapping.

pub mod handlers;
pub mod middleware;
pub mod render;
pub mod routes;

pub use middleware::PortalError;
pub use routes::create_router;
