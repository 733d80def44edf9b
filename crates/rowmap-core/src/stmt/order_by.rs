use super::{Direction, Ident, Nulls, OrderByExpr};
use crate::{Error, Result};

use std::str::FromStr;

/// An ORDER BY clause.
///
/// Built from caller text with [`OrderBy::parse`], which accepts a comma
/// separated list of `column [ASC|DESC] [NULLS FIRST|NULLS LAST]` terms.
/// Anything else is rejected so ordering text never reaches SQL unchecked.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub exprs: Vec<OrderByExpr>,
}

impl OrderBy {
    pub fn parse(text: &str) -> Result<OrderBy> {
        let mut exprs = vec![];

        for term in text.split(',') {
            exprs.push(parse_term(term).map_err(|err| {
                err.context(Error::invalid_statement(format!(
                    "invalid ORDER BY clause `{text}`"
                )))
            })?);
        }

        Ok(OrderBy { exprs })
    }

    pub fn column(column: Ident) -> OrderBy {
        OrderBy {
            exprs: vec![OrderByExpr::asc(column)],
        }
    }
}

fn parse_term(term: &str) -> Result<OrderByExpr> {
    let mut words = term.split_whitespace();

    let Some(column) = words.next() else {
        return Err(Error::invalid_statement("empty ordering term"));
    };

    let mut expr = OrderByExpr::asc(Ident::new(column)?);
    let rest: Vec<String> = words.map(str::to_ascii_uppercase).collect();
    let mut rest = &rest[..];

    if let Some(first) = rest.first() {
        let direction = match first.as_str() {
            "ASC" => Some(Direction::Asc),
            "DESC" => Some(Direction::Desc),
            _ => None,
        };

        if direction.is_some() {
            expr.direction = direction;
            rest = &rest[1..];
        }
    }

    match rest {
        [] => {}
        [nulls, first] if nulls == "NULLS" && first == "FIRST" => expr.nulls = Some(Nulls::First),
        [nulls, last] if nulls == "NULLS" && last == "LAST" => expr.nulls = Some(Nulls::Last),
        _ => {
            return Err(Error::invalid_statement(format!(
                "unexpected `{}` after column `{}`",
                rest.join(" "),
                expr.column
            )))
        }
    }

    Ok(expr)
}

impl FromStr for OrderBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OrderBy::parse(s)
    }
}
