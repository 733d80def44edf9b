//! Relationship descriptors and their resolution on records.
//!
//! A relation is registered on a table under a name. Looking that name up on
//! one of the table's records runs a separate query against the related
//! table (never a join) and caches the result on the record.

use crate::{table::TableInner, Field, Record, Table};

use rowmap_core::{
    stmt::{BinaryOp, Expr, Ident, Value},
    Error, Result,
};

use std::{fmt, sync::Weak};

/// How to fetch the records related to a record.
#[derive(Debug, Clone)]
pub enum Relation {
    /// Rows of another table whose column equals one of ours.
    Direct(Direct),

    /// One field projected out of another relation's records.
    Substratum(Substratum),

    /// A relation resolved on every record of another relation, flattened.
    Aggregate(Aggregate),
}

/// `target.target_column = self.column`
#[derive(Clone)]
pub struct Direct {
    column: Ident,

    /// Held weakly; a table may relate to itself.
    target: Weak<TableInner>,

    target_name: String,
    target_column: Ident,

    /// `true` resolves to a stream of records, `false` to at most one.
    many: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substratum {
    base: String,
    field: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    base: String,
    target: String,
}

impl Relation {
    /// At most one `target` row whose `target_column` equals the record's
    /// `column`. Resolves to a record, or null when there is none.
    pub fn one(column: &str, target: &Table, target_column: &str) -> Result<Relation> {
        Direct::new(column, target, target_column, false).map(Relation::Direct)
    }

    /// Every `target` row whose `target_column` equals the record's `column`,
    /// as a result stream.
    pub fn many(column: &str, target: &Table, target_column: &str) -> Result<Relation> {
        Direct::new(column, target, target_column, true).map(Relation::Direct)
    }

    /// Projects `field` out of the record(s) `base` resolves to.
    pub fn substratum(base: impl Into<String>, field: impl Into<String>) -> Relation {
        Relation::Substratum(Substratum {
            base: base.into(),
            field: field.into(),
        })
    }

    /// Resolves `target` on every record `base` resolves to and concatenates
    /// the results in base order.
    pub fn aggregate(base: impl Into<String>, target: impl Into<String>) -> Relation {
        Relation::Aggregate(Aggregate {
            base: base.into(),
            target: target.into(),
        })
    }

    pub(crate) fn resolve(&self, record: &mut Record, visiting: &mut Vec<String>) -> Result<Field> {
        match self {
            Relation::Direct(direct) => direct.resolve(record),
            Relation::Substratum(substratum) => substratum.resolve(record, visiting),
            Relation::Aggregate(aggregate) => aggregate.resolve(record, visiting),
        }
    }
}

impl Direct {
    fn new(column: &str, target: &Table, target_column: &str, many: bool) -> Result<Direct> {
        Ok(Direct {
            column: Ident::new(column)?,
            target: target.downgrade(),
            target_name: target.name().to_string(),
            target_column: Ident::new(target_column)?,
            many,
        })
    }

    pub fn column(&self) -> &Ident {
        &self.column
    }

    /// The related table.
    ///
    /// Fails once the catalog entry was dropped, e.g. after a catalog refresh
    /// when no handle to the old table is left.
    pub fn target(&self) -> Result<Table> {
        Table::upgrade(&self.target).ok_or_else(|| Error::table_not_found(&self.target_name))
    }

    pub fn target_column(&self) -> &Ident {
        &self.target_column
    }

    pub fn is_many(&self) -> bool {
        self.many
    }

    fn resolve(&self, record: &Record) -> Result<Field> {
        let target = self.target()?;
        let key = record.value(self.column.as_str()).cloned().unwrap_or_default();

        if self.many {
            // A null key relates to no rows.
            let filter = if key.is_null() {
                Expr::in_list(self.target_column.clone(), Vec::<Value>::new())
            } else {
                Expr::binary_op(self.target_column.clone(), BinaryOp::Eq, key)
            };

            return Ok(Field::Stream(target.get_where(filter)));
        }

        if key.is_null() {
            return Ok(Field::Value(Value::Null));
        }

        let filter = Expr::binary_op(self.target_column.clone(), BinaryOp::Eq, key);

        Ok(match target.get_one(filter)? {
            Some(related) => Field::Record(Box::new(related)),
            None => Field::Value(Value::Null),
        })
    }
}

impl fmt::Debug for Direct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Direct")
            .field("column", &self.column)
            .field("target", &self.target_name)
            .field("target_column", &self.target_column)
            .field("many", &self.many)
            .finish()
    }
}

impl Substratum {
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    fn resolve(&self, record: &mut Record, visiting: &mut Vec<String>) -> Result<Field> {
        let base = record.lookup(&self.base, visiting)?;
        project(base, &self.base, &self.field, visiting)
    }
}

impl Aggregate {
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    fn resolve(&self, record: &mut Record, visiting: &mut Vec<String>) -> Result<Field> {
        let mut related = vec![];
        collect_records(record.lookup(&self.base, visiting)?, &self.base, &mut related)?;

        let mut flattened = vec![];
        for mut item in related {
            splice(item.lookup(&self.target, visiting)?, &mut flattened)?;
        }

        Ok(Field::List(flattened))
    }
}

/// Takes `name` out of every record in `base`. Null stays null.
///
/// Related records share the caller's `visiting` stack, so a relation that
/// reaches itself through other records is caught like one on the same
/// record.
fn project(base: &mut Field, base_name: &str, name: &str, visiting: &mut Vec<String>) -> Result<Field> {
    match base {
        Field::Record(related) => Ok(related.lookup(name, visiting)?.clone()),
        Field::Stream(stream) => {
            let mut projected = vec![];
            for related in stream.iter() {
                projected.push(related?.lookup(name, visiting)?.clone());
            }
            Ok(Field::List(projected))
        }
        Field::List(items) => items
            .iter_mut()
            .map(|item| project(item, base_name, name, visiting))
            .collect::<Result<Vec<_>>>()
            .map(Field::List),
        Field::Value(Value::Null) => Ok(Field::Value(Value::Null)),
        Field::Value(_) => Err(not_records(base_name)),
    }
}

fn collect_records(base: &mut Field, base_name: &str, dst: &mut Vec<Record>) -> Result<()> {
    match base {
        Field::Record(related) => dst.push((**related).clone()),
        Field::Stream(stream) => {
            for related in stream.iter() {
                dst.push(related?);
            }
        }
        Field::List(items) => {
            for item in items {
                collect_records(item, base_name, dst)?;
            }
        }
        Field::Value(Value::Null) => {}
        Field::Value(_) => return Err(not_records(base_name)),
    }

    Ok(())
}

fn splice(resolved: &mut Field, dst: &mut Vec<Field>) -> Result<()> {
    match resolved {
        Field::Stream(stream) => {
            for related in stream.iter() {
                dst.push(Field::Record(Box::new(related?)));
            }
        }
        Field::List(items) => dst.extend(items.iter().cloned()),
        Field::Value(Value::Null) => {}
        field => dst.push(field.clone()),
    }

    Ok(())
}

fn not_records(name: &str) -> Error {
    Error::invalid_statement(format!("relation `{name}` does not resolve to records"))
}
