//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a static table description.

use serde_json::Value;

/// One column of an entity table. `pg_type` is used to cast the bound placeholder.
#[derive(Debug)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub pg_type: &'static str,
}

/// Many-to-one reference projected into reads: `LEFT JOIN table ON local_key = table.id`,
/// exposing `table.display_column AS alias`.
#[derive(Debug)]
pub struct JoinSpec {
    pub table: &'static str,
    pub local_key: &'static str,
    pub display_column: &'static str,
    pub alias: &'static str,
}

#[derive(Debug)]
pub struct TableSpec {
    pub table: &'static str,
    pub pk: &'static str,
    /// Writable columns; the primary key is store-assigned and never listed here.
    pub columns: &'static [ColumnSpec],
    pub join: Option<JoinSpec>,
    /// Leading sort columns for lists; the primary key is always appended.
    pub order_by: &'static [&'static str],
}

impl TableSpec {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// One statement with positional parameters in bind order.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    fn new() -> Self {
        Statement {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Quote identifier for PostgreSQL (safe: identifiers only come from `TableSpec`).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn qualified(table: &str, column: &str) -> String {
    format!("{}.{}", quoted(table), quoted(column))
}

fn placeholder(n: usize, pg_type: &str) -> String {
    format!("${}::{}", n, pg_type)
}

/// `SELECT t.*, ref.name AS alias FROM t LEFT JOIN ref ON ...`; WHERE and ORDER BY are appended by callers.
fn select_head(spec: &TableSpec) -> String {
    match &spec.join {
        Some(j) => format!(
            "SELECT {}.*, {} AS {} FROM {} LEFT JOIN {} ON {} = {}",
            quoted(spec.table),
            qualified(j.table, j.display_column),
            quoted(j.alias),
            quoted(spec.table),
            quoted(j.table),
            qualified(spec.table, j.local_key),
            qualified(j.table, "id"),
        ),
        None => format!("SELECT {}.* FROM {}", quoted(spec.table), quoted(spec.table)),
    }
}

/// All rows, joined to the reference table, in a stable order.
pub fn select_list(spec: &TableSpec) -> Statement {
    let mut q = Statement::new();
    let order = spec
        .order_by
        .iter()
        .chain(std::iter::once(&spec.pk))
        .map(|c| qualified(spec.table, c))
        .collect::<Vec<_>>()
        .join(", ");
    q.sql = format!("{} ORDER BY {}", select_head(spec), order);
    q
}

/// One row by primary key, same projection as the list.
pub fn select_by_id(spec: &TableSpec, id: i64) -> Statement {
    let mut q = Statement::new();
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "{} WHERE {} = {}",
        select_head(spec),
        qualified(spec.table, spec.pk),
        placeholder(n, "integer")
    );
    q
}

/// INSERT of the given assignments. Columns the table does not declare are skipped.
pub fn insert(spec: &TableSpec, fields: &[(&str, Value)]) -> Statement {
    let mut q = Statement::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (name, val) in fields {
        let Some(c) = spec.column(name) else { continue };
        let n = q.push_param(val.clone());
        cols.push(quoted(c.name));
        placeholders.push(placeholder(n, c.pg_type));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(spec.table),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE by id: SET only the given assignments that name declared columns.
pub fn update(spec: &TableSpec, id: i64, fields: &[(&str, Value)]) -> Statement {
    let mut q = Statement::new();
    let mut sets = Vec::new();
    for (name, val) in fields {
        let Some(c) = spec.column(name) else { continue };
        let n = q.push_param(val.clone());
        sets.push(format!("{} = {}", quoted(c.name), placeholder(n, c.pg_type)));
    }
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quoted(spec.table),
        sets.join(", "),
        quoted(spec.pk),
        placeholder(n, "integer")
    );
    q
}

/// DELETE by id.
pub fn delete(spec: &TableSpec, id: i64) -> Statement {
    let mut q = Statement::new();
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        quoted(spec.table),
        quoted(spec.pk),
        placeholder(n, "integer")
    );
    q
}
