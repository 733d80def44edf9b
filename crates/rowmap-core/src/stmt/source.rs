use super::Param;

/// Where a query reads its rows from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// `SELECT * FROM "table"`
    Table(String),

    /// Caller supplied SQL
    Raw(Raw),
}

/// Caller supplied SQL, bound with positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    pub sql: String,
    pub params: Vec<Param>,
}

impl Source {
    pub fn is_raw(&self) -> bool {
        matches!(self, Source::Raw(_))
    }
}
