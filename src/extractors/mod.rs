//! Request extractors that reject malformed input with the standard error envelope.

mod id;
mod payload;
pub use id::RecordId;
pub use payload::JsonObject;
