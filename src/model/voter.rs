use super::{Payload, Resource};
use crate::sql::{ColumnSpec, TableSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub struct Voters;

const VOTERS: TableSpec = TableSpec {
    table: "voters",
    pk: "id",
    columns: &[
        ColumnSpec { name: "first_name", pg_type: "text" },
        ColumnSpec { name: "last_name", pg_type: "text" },
        ColumnSpec { name: "email", pg_type: "text" },
    ],
    join: None,
    order_by: &["last_name"],
};

impl Resource for Voters {
    const TABLE: &'static TableSpec = &VOTERS;
    const LABEL: &'static str = "Voter";
    type Create = NewVoter;
    type Update = EmailChange;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewVoter {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Payload for NewVoter {
    const REQUIRED: &'static [&'static str] = &["first_name", "last_name", "email"];

    fn assignments(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("first_name", Value::from(self.first_name.as_str())),
            ("last_name", Value::from(self.last_name.as_str())),
            ("email", Value::from(self.email.as_str())),
        ]
    }
}

/// Body of `PUT /voter/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailChange {
    pub email: String,
}

impl Payload for EmailChange {
    const REQUIRED: &'static [&'static str] = &["email"];

    fn assignments(&self) -> Vec<(&'static str, Value)> {
        vec![("email", Value::from(self.email.as_str()))]
    }
}
