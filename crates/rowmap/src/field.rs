use crate::{Record, ResultStream};

use rowmap_core::stmt::Value;

/// The value of one entry of a [`Record`].
///
/// Stored columns are always [`Field::Value`]. Resolved relations take
/// whichever shape their descriptor produces.
#[derive(Debug, Clone)]
pub enum Field {
    Value(Value),

    /// A related record
    Record(Box<Record>),

    /// Related records, fetched on demand
    Stream(ResultStream),

    /// Projected or flattened relation results
    List(Vec<Field>),
}

impl Field {
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Value(Value::Null))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Field::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Field::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_stream_mut(&mut self) -> Option<&mut ResultStream> {
        match self {
            Field::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Field]> {
        match self {
            Field::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            Field::Record(record) => Some(*record),
            _ => None,
        }
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Field::Value(value)
    }
}

impl From<Record> for Field {
    fn from(record: Record) -> Self {
        Field::Record(Box::new(record))
    }
}

impl From<ResultStream> for Field {
    fn from(stream: ResultStream) -> Self {
        Field::Stream(stream)
    }
}

impl PartialEq<Value> for Field {
    fn eq(&self, other: &Value) -> bool {
        self.as_value() == Some(other)
    }
}
