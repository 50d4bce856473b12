mod database_type;

use std::fmt;

pub use database_type::*;

/// Represents a dynamically typed, nullable single value.
/// Literal operands of bound expressions carry one of these.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    /// SQL `NULL`
    Null,
    /// true or false value
    Boolean(Option<bool>),
    /// 64bit float
    Float64(Option<f64>),
    /// signed 32bit int
    Int32(Option<i32>),
    /// signed 64bit int
    Int64(Option<i64>),
    /// utf-8 encoded string.
    String(Option<String>),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TypeError {
    #[error("unsupported literal value: {0}")]
    UnsupportedLiteral(String),
}

macro_rules! impl_scalar {
    ($ty:ty, $scalar:tt) => {
        impl From<$ty> for ScalarValue {
            fn from(value: $ty) -> Self {
                ScalarValue::$scalar(Some(value))
            }
        }

        impl From<Option<$ty>> for ScalarValue {
            fn from(value: Option<$ty>) -> Self {
                ScalarValue::$scalar(value)
            }
        }
    };
}

impl_scalar!(f64, Float64);
impl_scalar!(i32, Int32);
impl_scalar!(i64, Int64);
impl_scalar!(bool, Boolean);
impl_scalar!(String, String);

impl TryFrom<&sqlparser::ast::Value> for ScalarValue {
    type Error = TypeError;

    fn try_from(v: &sqlparser::ast::Value) -> Result<Self, Self::Error> {
        let value = match v {
            sqlparser::ast::Value::Number(n, _) => {
                if let Ok(int) = n.parse::<i32>() {
                    int.into()
                } else if let Ok(bigint) = n.parse::<i64>() {
                    bigint.into()
                } else if let Ok(float) = n.parse::<f64>() {
                    float.into()
                } else {
                    return Err(TypeError::UnsupportedLiteral(n.clone()));
                }
            }
            sqlparser::ast::Value::SingleQuotedString(s) => s.clone().into(),
            sqlparser::ast::Value::DoubleQuotedString(s) => s.clone().into(),
            sqlparser::ast::Value::Boolean(b) => (*b).into(),
            sqlparser::ast::Value::Null => Self::Null,
            other => return Err(TypeError::UnsupportedLiteral(other.to_string())),
        };
        Ok(value)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScalarValue::Null
            | ScalarValue::Boolean(None)
            | ScalarValue::Float64(None)
            | ScalarValue::Int32(None)
            | ScalarValue::Int64(None)
            | ScalarValue::String(None) => write!(f, "NULL"),
            ScalarValue::Boolean(Some(v)) => write!(f, "{}", v),
            ScalarValue::Float64(Some(v)) => write!(f, "{}", v),
            ScalarValue::Int32(Some(v)) => write!(f, "{}", v),
            ScalarValue::Int64(Some(v)) => write!(f, "{}", v),
            ScalarValue::String(Some(v)) => write!(f, "'{}'", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlparser::ast::Value;
    use test_case::test_case;

    use super::*;

    #[test_case(Value::Number("1".to_string(), false), ScalarValue::Int32(Some(1)))]
    #[test_case(Value::Number("4294967296".to_string(), false), ScalarValue::Int64(Some(4294967296)))]
    #[test_case(Value::Number("1.5".to_string(), false), ScalarValue::Float64(Some(1.5)))]
    #[test_case(Value::SingleQuotedString("a".to_string()), ScalarValue::String(Some("a".to_string())))]
    #[test_case(Value::Boolean(true), ScalarValue::Boolean(Some(true)))]
    #[test_case(Value::Null, ScalarValue::Null)]
    fn test_scalar_from_sqlparser_value(value: Value, expected: ScalarValue) {
        assert_eq!(ScalarValue::try_from(&value), Ok(expected));
    }

    #[test]
    fn test_placeholder_is_not_a_literal() {
        let value = Value::Placeholder("?".to_string());
        assert_eq!(
            ScalarValue::try_from(&value),
            Err(TypeError::UnsupportedLiteral("?".to_string()))
        );
    }
}
