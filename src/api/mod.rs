//! HTTP surface

pub mod handlers;
pub mod routes;

pub use handlers::{health, metrics};
pub use routes::build_router;
