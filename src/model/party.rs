use super::{Payload, Resource};
use crate::sql::{ColumnSpec, TableSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub struct Parties;

const PARTIES: TableSpec = TableSpec {
    table: "parties",
    pk: "id",
    columns: &[
        ColumnSpec { name: "name", pg_type: "text" },
        ColumnSpec { name: "description", pg_type: "text" },
    ],
    join: None,
    order_by: &[],
};

impl Resource for Parties {
    const TABLE: &'static TableSpec = &PARTIES;
    const LABEL: &'static str = "Party";
    type Create = NewParty;
    type Update = PartyRename;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewParty {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Payload for NewParty {
    const REQUIRED: &'static [&'static str] = &["name"];

    fn assignments(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.as_str())),
            ("description", self.description.clone().map(Value::from).unwrap_or(Value::Null)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartyRename {
    pub name: String,
}

impl Payload for PartyRename {
    const REQUIRED: &'static [&'static str] = &["name"];

    fn assignments(&self) -> Vec<(&'static str, Value)> {
        vec![("name", Value::from(self.name.as_str()))]
    }
}
