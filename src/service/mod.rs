//! Request validation and per-entity data access.

mod accessor;
mod validation;
pub use accessor::EntityAccessor;
pub use validation::RequestValidator;
