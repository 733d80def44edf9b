mod column;
pub use column::ColumnInfo;
