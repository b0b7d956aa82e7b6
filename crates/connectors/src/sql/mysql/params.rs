use model::core::value::Value;
use mysql_async::{Params, Value as MySqlValue};

pub struct MySqlParam(MySqlValue);

impl MySqlParam {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Int32(i) => MySqlParam(MySqlValue::Int(i64::from(*i))),
            Value::String(s) => MySqlParam(MySqlValue::Bytes(s.clone().into_bytes())),
            Value::Null => MySqlParam(MySqlValue::NULL),
        }
    }
}

pub struct MySqlParamStore {
    pub params: Vec<MySqlParam>,
}

impl MySqlParamStore {
    pub fn from_values(values: &[Value]) -> Self {
        let params = values.iter().map(MySqlParam::from_value).collect();
        MySqlParamStore { params }
    }

    pub fn params(&self) -> Params {
        let mysql_values: Vec<MySqlValue> = self.params.iter().map(|p| p.0.clone()).collect();
        Params::Positional(mysql_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_params() {
        let store = MySqlParamStore::from_values(&[
            Value::Int32(9),
            Value::String("Zoe".to_string()),
            Value::Null,
        ]);

        assert_eq!(
            store.params(),
            Params::Positional(vec![
                MySqlValue::Int(9),
                MySqlValue::Bytes(b"Zoe".to_vec()),
                MySqlValue::NULL,
            ])
        );
    }
}
