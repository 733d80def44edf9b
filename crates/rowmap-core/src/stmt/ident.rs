use crate::{Error, Result};

use std::fmt;

/// A column name that is safe to place in SQL text.
///
/// Only ASCII letters, digits, and underscores are accepted. Column names
/// are the only caller-supplied text interpolated into statements, so the
/// check is strict: a violation is an error, never a sanitized substitute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident(String);

impl Ident {
    pub fn new(name: impl Into<String>) -> Result<Ident> {
        let name = name.into();

        if !Self::is_valid(&name) {
            return Err(Error::cannot_update_column(
                name,
                "column names may only contain letters, digits, and underscores",
            ));
        }

        Ok(Ident(name))
    }

    pub fn is_valid(name: &str) -> bool {
        !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for Ident {
    type Error = Error;

    fn try_from(name: &str) -> Result<Ident> {
        Ident::new(name)
    }
}

impl TryFrom<String> for Ident {
    type Error = Error;

    fn try_from(name: String) -> Result<Ident> {
        Ident::new(name)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["id", "manager_id", "Column2", "_x"] {
            assert!(Ident::new(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_sql_fragments() {
        for name in ["", " \"; DELETE FROM person;", "a b", "name--", "a.b", "naïve"] {
            let err = Ident::new(name).unwrap_err();
            assert!(err.is_cannot_update_column(), "{name}");
        }
    }
}
