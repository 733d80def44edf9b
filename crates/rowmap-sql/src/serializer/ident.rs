use super::{Formatter, Params, ToSql};

use rowmap_core::stmt::Ident;

/// A table name, always double-quoted.
pub(super) struct TableName<'a>(pub(super) &'a str);

impl ToSql for TableName<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('"');
        for c in self.0.chars() {
            if c == '"' {
                f.dst.push('"');
            }
            f.dst.push(c);
        }
        f.dst.push('"');
    }
}

/// Column names are validated on construction and written bare.
impl ToSql for &Ident {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self.as_str());
    }
}
