//! Route trees: the `/api` entity families and the operational endpoints.

mod api;
mod common;
pub use api::{api_routes, app};
pub use common::common_routes;
