use crate::{Field, Relation, Table};

use indexmap::IndexMap;
use rowmap_core::{
    driver::{Row, Rows},
    stmt::{Expr, Ident, Query, Value},
    Error, Result,
};
use rowmap_sql::{
    stmt::{Delete, Insert, LastInsert, Update},
    Statement,
};

/// One row of a table, held in memory.
///
/// Entries are stored columns, custom keys, and relations resolved on
/// access. Only the table's writable columns are sent back to storage.
#[derive(Debug, Clone)]
pub struct Record {
    table: Table,

    fields: IndexMap<String, Field>,

    /// True once the row exists in storage
    persisted: bool,

    /// Column values as last read from storage. Locates the row when its
    /// primary key is changed in memory.
    snapshot: IndexMap<String, Value>,
}

impl Record {
    pub(crate) fn new(table: Table) -> Record {
        Record {
            table,
            fields: IndexMap::new(),
            persisted: false,
            snapshot: IndexMap::new(),
        }
    }

    pub(crate) fn from_row(table: Table, row: Row) -> Record {
        let mut record = Record::new(table);
        record.load(row);
        record
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns `true` if the record was read from, or written to, storage.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Returns the entry `name`, resolving it through the table's relations
    /// when it is not stored on the record.
    ///
    /// A resolved relation is cached on the record until the next flush.
    pub fn get(&mut self, name: &str) -> Result<&Field> {
        self.get_mut(name).map(|field| &*field)
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Field> {
        self.lookup(name, &mut vec![])
    }

    /// Returns the entry `name` without resolving relations.
    pub fn peek(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns the stored value `name`, if it holds a plain value.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).and_then(Field::as_value)
    }

    /// Sets entry `name`.
    ///
    /// Fails with a `cannot update column` error when `name` is not a valid
    /// column name or names a generated column.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.check_writable(name)?;
        self.fields
            .insert(name.to_string(), Field::Value(value.into()));
        Ok(())
    }

    /// Stores `record` as the value of relation `name`.
    ///
    /// The related record is written before this one on flush.
    pub fn set_record(&mut self, name: &str, record: Record) -> Result<()> {
        self.check_writable(name)?;
        self.fields.insert(name.to_string(), record.into());
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Field> {
        self.fields.shift_remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> + '_ {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Stored values, without relation entries and primary key columns.
    ///
    /// Useful to copy a row: `table.record(record.no_pks())`.
    pub fn no_pks(&self) -> IndexMap<String, Value> {
        let primary_key = self.table.primary_key();
        let mut values = self.no_refs();
        values.retain(|name, _| !primary_key.contains(name));
        values
    }

    /// Stored values, without relation entries.
    pub fn no_refs(&self) -> IndexMap<String, Value> {
        let relations = self.table.relation_names();

        self.fields
            .iter()
            .filter(|(name, _)| !relations.contains(name))
            .filter_map(|(name, field)| Some((name.clone(), field.as_value()?.clone())))
            .collect()
    }

    /// Relation entries resolved or set on this record.
    pub fn references(&self) -> IndexMap<String, Field> {
        let relations = self.table.relation_names();

        self.fields
            .iter()
            .filter(|(name, _)| relations.contains(name))
            .map(|(name, field)| (name.clone(), field.clone()))
            .collect()
    }

    /// Writes the record to storage and reloads it.
    ///
    /// A new record is inserted. A persisted one is updated, located by the
    /// primary key it was read with. Related records stored on one-to-one
    /// relations are written first and the owning columns take their keys.
    /// On success, resolved relations are dropped and every column is
    /// replaced by the stored row. On failure the record is left as it was.
    pub fn flush(&mut self) -> Result<()> {
        let fills = self.flush_related()?;

        let columns = self.table.columns()?;
        let computed = self.table.computed_columns()?;
        let relations = self.table.relation_names();

        let mut pending: IndexMap<&str, Value> = self
            .fields
            .iter()
            .filter(|(name, _)| !relations.contains(name))
            .filter_map(|(name, field)| Some((name.as_str(), field.as_value()?.clone())))
            .collect();

        for (name, value) in &fills {
            pending.insert(name.as_str(), value.clone());
        }

        let mut values = vec![];
        for (name, value) in pending {
            if columns.iter().any(|column| column == name) && !computed.iter().any(|c| c == name) {
                values.push((Ident::new(name)?, value));
            }
        }

        let row = if self.persisted {
            self.update(values)?
        } else {
            self.insert(values)?
        };

        // Resolved results go, including those of relations since removed.
        self.fields
            .retain(|name, field| matches!(field, Field::Value(_)) && !relations.contains(name));
        self.load(row);
        Ok(())
    }

    /// Deletes the row with the record's current primary key. The record
    /// itself is left untouched.
    pub fn delete(&self) -> Result<()> {
        let filter = self.key_filter(|name| self.value(name))?;

        let delete = Delete {
            table: self.table.name().to_string(),
            filter,
        };

        self.table.engine().execute(&delete.into())?;
        Ok(())
    }

    pub(crate) fn lookup(&mut self, name: &str, visiting: &mut Vec<String>) -> Result<&mut Field> {
        if let Some(index) = self.fields.get_index_of(name) {
            return Ok(&mut self.fields[index]);
        }

        let Some(relation) = self.table.relation(name) else {
            return Err(Error::field_not_found(self.table.name(), name));
        };

        if visiting.iter().any(|seen| seen == name) {
            return Err(Error::invalid_statement(format!(
                "relation `{name}` refers back to itself; table={}",
                self.table.name()
            )));
        }

        visiting.push(name.to_string());
        let resolved = relation.resolve(self, visiting);
        visiting.pop();

        let (index, _) = self.fields.insert_full(name.to_string(), resolved?);
        Ok(&mut self.fields[index])
    }

    fn check_writable(&self, name: &str) -> Result<()> {
        Ident::new(name)?;

        if self.table.computed_columns()?.iter().any(|column| column == name) {
            return Err(Error::cannot_update_column(name, "generated column"));
        }

        Ok(())
    }

    /// Flushes records stored on one-to-one relations that are new or
    /// changed. Returns the owning column values to bring in line with them.
    fn flush_related(&mut self) -> Result<Vec<(String, Value)>> {
        let related: Vec<_> = self
            .fields
            .iter()
            .filter(|(_, field)| matches!(field, Field::Record(_)))
            .filter_map(|(name, _)| match self.table.relation(name) {
                Some(Relation::Direct(direct)) if !direct.is_many() => Some((name.clone(), direct)),
                _ => None,
            })
            .collect();

        let mut fills = vec![];

        for (name, direct) in related {
            let Some(Field::Record(record)) = self.fields.get_mut(&name) else {
                continue;
            };

            if !record.persisted || record.is_changed() {
                record.flush()?;
            }

            let key = record
                .value(direct.target_column().as_str())
                .cloned()
                .unwrap_or_default();

            // The owning column follows the related key, which may have
            // just been assigned or changed.
            let column = direct.column().as_str();
            if self.value(column) != Some(&key) {
                fills.push((column.to_string(), key));
            }
        }

        Ok(fills)
    }

    fn insert(&self, values: Vec<(Ident, Value)>) -> Result<Row> {
        let engine = self.table.engine();
        let name = self.table.name();
        let returning = engine.capability().returning;

        let insert = Insert {
            table: name.to_string(),
            values,
            returning,
        };

        if returning {
            return written_row(engine.query(&insert.into())?, name);
        }

        engine.execute(&insert.into())?;

        let last = LastInsert {
            table: name.to_string(),
        };
        written_row(engine.query(&last.into())?, name)
    }

    fn update(&self, values: Vec<(Ident, Value)>) -> Result<Row> {
        let engine = self.table.engine();
        let name = self.table.name();
        let returning = engine.capability().returning;

        let current = self.key_filter(|column| self.snapshot.get(column).or_else(|| self.value(column)))?;
        let changed = self.key_filter(|column| self.value(column))?;

        if !values.is_empty() {
            let update = Update {
                table: name.to_string(),
                assignments: values,
                filter: current,
                returning,
            };

            if returning {
                return written_row(engine.query(&update.into())?, name);
            }

            engine.execute(&update.into())?;
        }

        let query = Query::table(name).filter(changed);
        written_row(engine.query(&Statement::query(query))?, name)
    }

    /// Matches the primary key columns against the values `key` gives.
    fn key_filter<'a>(&'a self, key: impl Fn(&str) -> Option<&'a Value>) -> Result<Expr> {
        let primary_key = self.table.primary_key();

        if primary_key.is_empty() {
            return Err(Error::no_primary_key(format!("table={}", self.table.name())));
        }

        Expr::matching(
            primary_key
                .iter()
                .map(|column| (column, key(column.as_str()).cloned().unwrap_or_default())),
        )
    }

    fn is_changed(&self) -> bool {
        let relations = self.table.relation_names();

        self.fields.iter().any(|(name, field)| match field {
            Field::Value(value) => {
                !relations.contains(name) && self.snapshot.get(name) != Some(value)
            }
            _ => false,
        })
    }

    /// Replaces the stored values and snapshot with `row`.
    fn load(&mut self, row: Row) {
        self.snapshot.clear();

        for (name, value) in row {
            self.snapshot.insert(name.clone(), value.clone());
            self.fields.insert(name, Field::Value(value));
        }

        self.persisted = true;
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Record) -> bool {
        self.table == other.table && self.no_refs() == other.no_refs()
    }
}

fn written_row(mut rows: Rows, table: &str) -> Result<Row> {
    rows.next().ok_or_else(|| {
        Error::record_not_found(format!("table={table}; written row could not be read back"))
    })
}
