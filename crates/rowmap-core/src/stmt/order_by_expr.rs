use super::Ident;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub column: Ident,
    pub direction: Option<Direction>,
    pub nulls: Option<Nulls>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nulls {
    First,
    Last,
}

impl OrderByExpr {
    pub fn asc(column: Ident) -> OrderByExpr {
        OrderByExpr {
            column,
            direction: None,
            nulls: None,
        }
    }

    pub fn desc(column: Ident) -> OrderByExpr {
        OrderByExpr {
            column,
            direction: Some(Direction::Desc),
            nulls: None,
        }
    }
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl Nulls {
    pub fn as_str(self) -> &'static str {
        match self {
            Nulls::First => "NULLS FIRST",
            Nulls::Last => "NULLS LAST",
        }
    }
}
