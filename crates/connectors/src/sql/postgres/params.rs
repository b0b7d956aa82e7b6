use model::core::value::Value;
use tokio_postgres::types::ToSql;

type PgValue = Box<dyn ToSql + Sync + Send>;

/// Owned parameters for one statement, borrowed by the driver at execute time.
pub struct PgParams {
    values: Vec<PgValue>,
}

impl PgParams {
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter().map(to_pg).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| &**v as &(dyn ToSql + Sync))
            .collect()
    }
}

fn to_pg(value: Value) -> PgValue {
    match value {
        Value::Int32(v) => Box::new(v),
        Value::String(v) => Box::new(v),
        // Only `Name` is nullable, so a NULL is always sent as text.
        Value::Null => Box::new(Option::<String>::None),
    }
}
