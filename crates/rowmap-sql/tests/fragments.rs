use pretty_assertions::assert_eq;
use rowmap_core::stmt::{Column, Expr, Ident, Param, Value};
use rowmap_sql::Serializer;

fn pairs(values: &[(&str, Value)]) -> Vec<(Ident, Value)> {
    values
        .iter()
        .map(|(name, value)| (Ident::new(*name).unwrap(), value.clone()))
        .collect()
}

#[test]
fn where_sorts_columns_sqlite() {
    let expr = Expr::matching([("name", Value::from("Dave")), ("id", Value::from(10))]).unwrap();

    let mut params = Vec::<Param>::new();
    let sql = Serializer::sqlite().where_fragment(&expr, &mut params);

    assert_eq!(sql, "id=:id AND name=:name");
    assert_eq!(
        params,
        [
            Param::named("id", Value::I64(10)),
            Param::named("name", Value::from("Dave")),
        ]
    );
}

#[test]
fn where_sorts_columns_postgresql() {
    let expr = Expr::matching([("name", Value::from("Dave")), ("id", Value::from(10))]).unwrap();

    let mut params = Vec::<Param>::new();
    let sql = Serializer::postgresql().where_fragment(&expr, &mut params);

    assert_eq!(sql, "id=$1 AND name=$2");
    assert_eq!(params.len(), 2);
}

#[test]
fn where_membership_sqlite_expands_list() {
    let expr = Expr::matching([
        ("id", Value::from(vec![10, 11, 13])),
        ("group", Value::from("group")),
    ])
    .unwrap();

    let mut params = Vec::<Param>::new();
    let sql = Serializer::sqlite().where_fragment(&expr, &mut params);

    assert_eq!(sql, "group=:group AND id IN (:id, :id_1, :id_2)");
    assert_eq!(params[3], Param::named("id_2", Value::I64(13)));
}

#[test]
fn where_membership_postgresql_binds_array() {
    let expr = Expr::matching([
        ("id", Value::from(vec![10, 11, 13])),
        ("group", Value::from("group")),
    ])
    .unwrap();

    let mut params = Vec::<Param>::new();
    let sql = Serializer::postgresql().where_fragment(&expr, &mut params);

    assert_eq!(sql, "group=$1 AND id = ANY($2)");
    assert_eq!(
        params[1].value,
        Value::List(vec![Value::I64(10), Value::I64(11), Value::I64(13)])
    );
}

#[test]
fn empty_where_is_empty() {
    let mut params = Vec::<Param>::new();
    let sql = Serializer::sqlite().where_fragment(&Expr::all(), &mut params);

    assert_eq!(sql, "");
    assert!(params.is_empty());
}

#[test]
fn set_fragment() {
    let values = pairs(&[("person", Value::from("Dave")), ("id", Value::from(10))]);

    let mut params = Vec::<Param>::new();
    assert_eq!(
        Serializer::sqlite().set_fragment(&values, &mut params),
        "id=:id, person=:person"
    );

    let mut params = Vec::<Param>::new();
    assert_eq!(
        Serializer::postgresql().set_fragment(&values, &mut params),
        "id=$1, person=$2"
    );
}

#[test]
fn insert_fragment() {
    let values = pairs(&[("person", Value::from("Dave")), ("id", Value::from(10))]);

    let mut params = Vec::<Param>::new();
    assert_eq!(
        Serializer::sqlite().insert_fragment(&values, &mut params),
        "(id, person) VALUES (:id, :person)"
    );

    let mut params = Vec::<Param>::new();
    assert_eq!(
        Serializer::postgresql().insert_fragment(&values, &mut params),
        "(id, person) VALUES ($1, $2)"
    );

    let mut params = Vec::<Param>::new();
    assert_eq!(Serializer::sqlite().insert_fragment(&[], &mut params), "");
}

#[test]
fn json_is_bound_as_text() {
    let doc = serde_json::json!({"name": "stapler"});
    let values = pairs(&[("other", Value::from(doc))]);

    let mut params = Vec::<Param>::new();
    let sql = Serializer::sqlite().insert_fragment(&values, &mut params);

    assert_eq!(sql, "(other) VALUES (:other)");
    assert_eq!(params[0].value, Value::from(r#"{"name":"stapler"}"#));
}

#[test]
fn comparisons_and_groups() {
    let id = Column::new("id").unwrap();
    let name = Column::new("name").unwrap();

    let expr = id
        .gt(1)
        .and(name.eq("Bob").or(name.is_null()))
        .and(id.ne(Value::Null));

    let mut params = Vec::<Param>::new();
    assert_eq!(
        Serializer::sqlite().where_fragment(&expr, &mut params),
        "id>:id AND (name=:name OR name IS NULL) AND id IS NOT NULL"
    );

    let expr = id.le(3).and(id.ge(1)).or(name.like("B%"));

    let mut params = Vec::<Param>::new();
    assert_eq!(
        Serializer::postgresql().where_fragment(&expr, &mut params),
        "(id<=$1 AND id>=$2) OR name LIKE $3"
    );
}

#[test]
fn ilike_depends_on_dialect() {
    let name = Column::new("name").unwrap();
    let expr = name.ilike("b%");

    let mut params = Vec::<Param>::new();
    assert_eq!(
        Serializer::sqlite().where_fragment(&expr, &mut params),
        "name LIKE :name"
    );

    let mut params = Vec::<Param>::new();
    assert_eq!(
        Serializer::postgresql().where_fragment(&expr, &mut params),
        "name ILIKE $1"
    );
}

#[test]
fn empty_membership_matches_nothing() {
    let expr = Expr::in_list(Ident::new("manager_id").unwrap(), Vec::<Value>::new());

    for serializer in [Serializer::sqlite(), Serializer::postgresql()] {
        let mut params = Vec::<Param>::new();
        assert_eq!(serializer.where_fragment(&expr, &mut params), "1=0");
        assert!(params.is_empty());
    }
}
