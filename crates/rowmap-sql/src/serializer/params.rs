use super::{Flavor, Formatter, ToSql};

use rowmap_core::stmt::{Param, Value};

/// Collects the values bound to a statement's placeholders.
pub trait Params {
    /// Adds a value for a placeholder emitted next to column `name`.
    fn push(&mut self, name: &str, value: &Value) -> Placeholder;

    /// Adds a value for a placeholder written by the caller in raw SQL.
    fn push_positional(&mut self, value: &Value);
}

/// A placeholder as emitted into SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Unique among the statement's parameters.
    pub name: String,

    /// 1-based position of the parameter.
    pub position: usize,
}

impl Params for Vec<Param> {
    fn push(&mut self, name: &str, value: &Value) -> Placeholder {
        let taken = |candidate: &str| {
            self.iter()
                .any(|param| param.name.as_deref() == Some(candidate))
        };

        let mut unique = name.to_string();
        let mut suffix = 0;

        while taken(&unique) {
            suffix += 1;
            unique = format!("{name}_{suffix}");
        }

        Vec::push(self, Param::named(unique.clone(), value.to_bindable()));

        Placeholder {
            name: unique,
            position: self.len(),
        }
    }

    fn push_positional(&mut self, value: &Value) {
        Vec::push(self, Param::positional(value.to_bindable()));
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: super::Params>(self, f: &mut Formatter<'_, P>) {
        match f.serializer.flavor {
            Flavor::Postgresql => {
                f.dst.push('$');
                fmt!(f, self.position as u64);
            }
            Flavor::Sqlite => {
                f.dst.push(':');
                f.dst.push_str(&self.name);
            }
        }
    }
}

/// A value bound next to a column.
pub(super) struct Bind<'a> {
    pub(super) column: &'a str,
    pub(super) value: &'a Value,
}

impl ToSql for Bind<'_> {
    fn to_sql<P: super::Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self.column, self.value);
        fmt!(f, placeholder);
    }
}
