use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres::{
    types::{private::BytesMut, to_sql_checked, IsNull, Kind, ToSql, Type},
    Row,
};
use rowmap_core::{err, stmt::Value as CoreValue, Error, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Text form of `TIMESTAMP` values, both read and bound.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

type BoxError = Box<dyn std::error::Error + Sync + Send>;

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

fn mismatch(value: &CoreValue, ty: &Type) -> BoxError {
    format!("cannot bind {value:?} to a parameter of type `{ty}`").into()
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => value.to_sql(ty, out),
            CoreValue::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                Type::INT8 => value.to_sql(ty, out),
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => (*value as f64).to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*value).to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR => value.to_string().to_sql(ty, out),
                _ => Err(mismatch(&self.0, ty)),
            },
            CoreValue::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => value.to_sql(ty, out),
                Type::NUMERIC => Decimal::try_from(*value)?.to_sql(ty, out),
                _ => Err(mismatch(&self.0, ty)),
            },
            CoreValue::String(value) => match *ty {
                // Semi-structured values arrive here already encoded as text
                Type::JSON | Type::JSONB => {
                    serde_json::from_str::<serde_json::Value>(value)?.to_sql(ty, out)
                }
                Type::INT2 => value.trim().parse::<i16>()?.to_sql(ty, out),
                Type::INT4 => value.trim().parse::<i32>()?.to_sql(ty, out),
                Type::INT8 => value.trim().parse::<i64>()?.to_sql(ty, out),
                // Types read back as text are bound from the same text form
                Type::NUMERIC => value.trim().parse::<Decimal>()?.to_sql(ty, out),
                Type::DATE => value.parse::<NaiveDate>()?.to_sql(ty, out),
                Type::TIME => value.parse::<NaiveTime>()?.to_sql(ty, out),
                Type::TIMESTAMP => {
                    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)?.to_sql(ty, out)
                }
                Type::TIMESTAMPTZ => DateTime::parse_from_rfc3339(value)?
                    .with_timezone(&Utc)
                    .to_sql(ty, out),
                Type::UUID => value.parse::<Uuid>()?.to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
                    value.to_sql(ty, out)
                }
                _ => Err(mismatch(&self.0, ty)),
            },
            CoreValue::Bytes(value) => match *ty {
                Type::BYTEA => value.to_sql(ty, out),
                _ => Err(mismatch(&self.0, ty)),
            },
            CoreValue::Json(value) => match *ty {
                Type::JSON | Type::JSONB => value.to_sql(ty, out),
                _ => value.to_string().to_sql(ty, out),
            },
            CoreValue::List(values) => match ty.kind() {
                Kind::Array(_) => values
                    .iter()
                    .cloned()
                    .map(Value)
                    .collect::<Vec<_>>()
                    .to_sql(ty, out),
                _ => Err(mismatch(&self.0, ty)),
            },
        }
    }

    // Compatibility is decided per value in `to_sql`; a NULL binds to any type.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// Converts a PostgreSQL value within a row to a core value.
///
/// Numeric, temporal and UUID columns are read as text so that no precision
/// is lost; writing the text back binds the original type.
pub(crate) fn from_row(row: &Row, index: usize, ty: &Type) -> Result<CoreValue> {
    fn get<'a, T, F>(row: &'a Row, index: usize, f: F) -> Result<CoreValue>
    where
        T: postgres::types::FromSql<'a>,
        F: FnOnce(T) -> CoreValue,
    {
        let value: Option<T> = row.try_get(index).map_err(Error::driver)?;
        Ok(value.map(f).unwrap_or(CoreValue::Null))
    }

    fn list<T: Into<CoreValue>>(values: Vec<T>) -> CoreValue {
        CoreValue::List(values.into_iter().map(Into::into).collect())
    }

    match *ty {
        Type::BOOL => get(row, index, CoreValue::Bool),
        Type::INT2 => get(row, index, |v: i16| CoreValue::I64(v.into())),
        Type::INT4 => get(row, index, |v: i32| CoreValue::I64(v.into())),
        Type::INT8 => get(row, index, CoreValue::I64),
        Type::OID => get(row, index, |v: u32| CoreValue::I64(v.into())),
        Type::FLOAT4 => get(row, index, |v: f32| CoreValue::F64(v.into())),
        Type::FLOAT8 => get(row, index, CoreValue::F64),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            get(row, index, CoreValue::String)
        }
        Type::BYTEA => get(row, index, CoreValue::Bytes),
        Type::JSON | Type::JSONB => get(row, index, CoreValue::Json),
        Type::NUMERIC => get(row, index, |v: Decimal| CoreValue::String(v.to_string())),
        Type::DATE => get(row, index, |v: NaiveDate| CoreValue::String(v.to_string())),
        Type::TIME => get(row, index, |v: NaiveTime| CoreValue::String(v.to_string())),
        Type::TIMESTAMP => get(row, index, |v: NaiveDateTime| {
            CoreValue::String(v.format(TIMESTAMP_FORMAT).to_string())
        }),
        Type::TIMESTAMPTZ => get(row, index, |v: DateTime<Utc>| {
            CoreValue::String(v.to_rfc3339())
        }),
        Type::UUID => get(row, index, |v: Uuid| CoreValue::String(v.to_string())),
        Type::INT4_ARRAY => get(row, index, list::<i32>),
        Type::INT8_ARRAY => get(row, index, list::<i64>),
        Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => get(row, index, list::<String>),
        _ => Err(err!(
            "unsupported PostgreSQL column type `{ty}` for column `{}`",
            row.columns()[index].name()
        )),
    }
}
