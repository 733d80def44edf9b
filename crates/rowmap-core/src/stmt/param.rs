use super::Value;

/// A value bound to a statement placeholder.
///
/// Named placeholders (SQLite `:name`) carry the name they were emitted
/// with; positional ones (raw queries, PostgreSQL `$N`) are bound in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<String>,
    pub value: Value,
}

impl Param {
    pub fn named(name: impl Into<String>, value: Value) -> Param {
        Param {
            name: Some(name.into()),
            value,
        }
    }

    pub fn positional(value: Value) -> Param {
        Param { name: None, value }
    }
}
