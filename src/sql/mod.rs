//! Safe SQL builder: identifiers from static table descriptions only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub(crate) use builder::quoted;
pub use params::*;
