//! Gear catalogue backend.
//!
//! Layout follows a hexagonal split: [`domain`] holds entities, the
//! authorization policy, ports and services; [`inbound`] adapts HTTP onto
//! the services; [`outbound`] provides PostgreSQL, in-memory and security
//! adapters behind the ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
