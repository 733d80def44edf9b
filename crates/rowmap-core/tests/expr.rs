use pretty_assertions::assert_eq;
use rowmap_core::stmt::{BinaryOp, Column, Expr, ExprInList, Ident, Query, Value};

fn ident(name: &str) -> Ident {
    Ident::new(name).unwrap()
}

#[test]
fn matching_sorts_columns_and_detects_lists() {
    let expr = Expr::matching([
        ("name", Value::from("Bob")),
        ("id", Value::from(vec![1, 2])),
    ])
    .unwrap();

    let Expr::And(and) = expr else {
        panic!("expected an AND expression");
    };

    assert_eq!(and.operands.len(), 2);
    assert_eq!(
        and.operands[0],
        Expr::InList(ExprInList {
            column: ident("id"),
            list: vec![Value::I64(1), Value::I64(2)],
        })
    );
    assert_eq!(
        and.operands[1],
        Expr::binary_op(ident("name"), BinaryOp::Eq, "Bob")
    );
}

#[test]
fn matching_rejects_bad_column_names() {
    let err = Expr::matching([("id; --", 1)]).unwrap_err();
    assert!(err.is_cannot_update_column());
}

#[test]
fn empty_matching_is_empty() {
    let expr = Expr::matching(Vec::<(&str, Value)>::new()).unwrap();
    assert!(expr.is_empty());
    assert!(Expr::all().is_empty());
}

#[test]
fn and_flattens_and_skips_empty() {
    let id = Column::new("id").unwrap();
    let name = Column::new("name").unwrap();

    let expr = id.gt(1).and(Expr::all()).and(name.eq("Alice").and(id.lt(10)));

    let Expr::And(and) = &expr else {
        panic!("expected an AND expression");
    };
    assert_eq!(and.operands.len(), 3);

    let columns: Vec<_> = expr.columns().into_iter().map(Ident::as_str).collect();
    assert_eq!(columns, ["id", "name", "id"]);

    assert_eq!(Expr::all().and(id.eq(1)), id.eq(1));
}

#[test]
fn or_flattens() {
    let id = Column::new("id").unwrap();
    let expr = id.eq(1).or(id.eq(2)).or(id.is_null());

    let Expr::Or(or) = expr else {
        panic!("expected an OR expression");
    };
    assert_eq!(or.operands.len(), 3);
}

#[test]
fn query_and_keeps_template() {
    let id = Column::new("id").unwrap();
    let base = Query::table("person").filter(id.gt(0));
    let refined = base.clone().and(id.lt(5));

    assert_eq!(base.filter, id.gt(0));
    assert_eq!(refined.filter, id.gt(0).and(id.lt(5)));
    assert!(!refined.is_raw());
    assert!(Query::raw("SELECT 1", Vec::<Value>::new()).is_raw());
}
