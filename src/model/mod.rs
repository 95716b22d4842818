//! Entities exposed over HTTP: table description, labels and typed request bodies.

mod candidate;
mod party;
mod voter;

pub use candidate::{Candidates, NewCandidate, PartyAssignment};
pub use party::{NewParty, Parties, PartyRename};
pub use voter::{EmailChange, NewVoter, Voters};

use crate::sql::TableSpec;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Typed body of a create or update request.
pub trait Payload: DeserializeOwned + Serialize + Send + Sync {
    /// Keys that must be present (and non-blank when strings) before the body is parsed.
    const REQUIRED: &'static [&'static str];

    /// Column assignments in bind order.
    fn assignments(&self) -> Vec<(&'static str, Value)>;
}

/// One route family: the table it reads and writes and the bodies it accepts.
pub trait Resource: Send + Sync + 'static {
    const TABLE: &'static TableSpec;
    /// Used in the not-found message, e.g. "Candidate not found".
    const LABEL: &'static str;
    type Create: Payload;
    type Update: Payload;
}
