use super::{Payload, Resource};
use crate::sql::{ColumnSpec, JoinSpec, TableSpec};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub struct Candidates;

const CANDIDATES: TableSpec = TableSpec {
    table: "candidates",
    pk: "id",
    columns: &[
        ColumnSpec { name: "first_name", pg_type: "text" },
        ColumnSpec { name: "last_name", pg_type: "text" },
        ColumnSpec { name: "industry_connected", pg_type: "boolean" },
        ColumnSpec { name: "party_id", pg_type: "integer" },
    ],
    join: Some(JoinSpec {
        table: "parties",
        local_key: "party_id",
        display_column: "name",
        alias: "party_name",
    }),
    order_by: &[],
};

impl Resource for Candidates {
    const TABLE: &'static TableSpec = &CANDIDATES;
    const LABEL: &'static str = "Candidate";
    type Create = NewCandidate;
    type Update = PartyAssignment;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "flag")]
    pub industry_connected: bool,
}

impl Payload for NewCandidate {
    const REQUIRED: &'static [&'static str] = &["first_name", "last_name", "industry_connected"];

    fn assignments(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("first_name", Value::from(self.first_name.as_str())),
            ("last_name", Value::from(self.last_name.as_str())),
            ("industry_connected", Value::from(self.industry_connected)),
        ]
    }
}

/// Body of `PUT /candidate/:id`. A null `party_id` clears the assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartyAssignment {
    pub party_id: Option<i64>,
}

impl Payload for PartyAssignment {
    const REQUIRED: &'static [&'static str] = &["party_id"];

    fn assignments(&self) -> Vec<(&'static str, Value)> {
        vec![("party_id", self.party_id.map(Value::from).unwrap_or(Value::Null))]
    }
}

/// Accepts `true`/`false` as well as `1`/`0`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }
    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(n) => Err(serde::de::Error::custom(format!(
            "industry_connected must be a boolean or 0/1, got {}",
            n
        ))),
    }
}
