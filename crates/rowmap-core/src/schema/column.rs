/// A column as reported by the storage catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// The name of the column in the database.
    pub name: String,

    /// True if the column's value is computed by the database
    /// (`GENERATED ALWAYS AS ...`) and cannot be written.
    pub generated: bool,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>) -> ColumnInfo {
        ColumnInfo {
            name: name.into(),
            generated: false,
        }
    }

    pub fn generated(name: impl Into<String>) -> ColumnInfo {
        ColumnInfo {
            name: name.into(),
            generated: true,
        }
    }
}
