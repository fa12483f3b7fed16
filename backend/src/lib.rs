//! Service station backend library modules.
//!
//! Customers register, sign in with a `token` cookie, register cars, open
//! service orders, and exchange messages with staff on each order.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
