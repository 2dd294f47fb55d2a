//! SQL values and parameter handling.
//!
//! Every argument bound to a placeholder is a [`SqlValue`], a closed tagged
//! variant with one arm per [`ColumnType`]. [`ColumnValue`] ties a Rust type
//! to its column type at compile time, so a `Column<i64>` can only ever be
//! compared with or assigned an `i64`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::schema::ColumnType;

/// A SQL value that can be used as a parameter.
#[derive(Debug, Clone)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Text value.
    Text(String),
    /// 32-bit integer value.
    Int(i32),
    /// 64-bit integer value.
    Long(i64),
    /// Single precision float value.
    Float(f32),
    /// Double precision float value.
    Double(f64),
    /// Exact decimal value.
    Decimal(Decimal),
    /// Boolean value.
    Bool(bool),
}

impl SqlValue {
    /// Returns `true` for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the column type this value belongs to, or `None` for NULL.
    #[must_use]
    pub const fn column_type(&self) -> Option<ColumnType> {
        match self {
            Self::Null => None,
            Self::Text(_) => Some(ColumnType::String),
            Self::Int(_) => Some(ColumnType::Int),
            Self::Long(_) => Some(ColumnType::Long),
            Self::Float(_) => Some(ColumnType::Float),
            Self::Double(_) => Some(ColumnType::Double),
            Self::Decimal(_) => Some(ColumnType::Decimal),
            Self::Bool(_) => Some(ColumnType::Boolean),
        }
    }

    /// Name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self.column_type() {
            Some(ty) => ty.name(),
            None => "NULL",
        }
    }

    /// Returns `true` if the value may be bound to a column of type `ty`.
    ///
    /// NULL fits every column.
    #[must_use]
    pub fn fits(&self, ty: ColumnType) -> bool {
        match self.column_type() {
            Some(own) => own == ty,
            None => true,
        }
    }
}

impl PartialEq for SqlValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for SqlValue {}

impl Hash for SqlValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Text(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Long(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Double(v) => v.to_bits().hash(state),
            Self::Decimal(v) => v.hash(state),
            Self::Bool(v) => v.hash(state),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Long(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Double(self)
    }
}

impl ToSqlValue for Decimal {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Decimal(self)
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

/// A Rust type that can be stored in a typed column.
///
/// Each implementor is bound to exactly one [`ColumnType`]. Decoding from a
/// result value applies the null defaults of the row API: NULL text becomes
/// an empty string, a NULL decimal becomes zero, NULL numbers become zero and
/// a NULL boolean is `false`.
pub trait ColumnValue: ToSqlValue + Sized {
    /// The column type values of this Rust type are stored as.
    const TYPE: ColumnType;

    /// Converts a driver value back into this type.
    ///
    /// # Errors
    ///
    /// Returns a description of the mismatch if `value` cannot represent `Self`.
    fn from_sql_value(value: &SqlValue) -> Result<Self, String>;
}

fn unexpected(value: &SqlValue, ty: ColumnType) -> String {
    format!("cannot read {} as {ty}", value.type_name())
}

impl ColumnValue for String {
    const TYPE: ColumnType = ColumnType::String;

    fn from_sql_value(value: &SqlValue) -> Result<Self, String> {
        match value {
            SqlValue::Null => Ok(Self::new()),
            SqlValue::Text(v) => Ok(v.clone()),
            SqlValue::Int(v) => Ok(v.to_string()),
            SqlValue::Long(v) => Ok(v.to_string()),
            SqlValue::Float(v) => Ok(v.to_string()),
            SqlValue::Double(v) => Ok(v.to_string()),
            SqlValue::Decimal(v) => Ok(v.to_string()),
            SqlValue::Bool(v) => Ok(v.to_string()),
        }
    }
}

impl ColumnValue for i32 {
    const TYPE: ColumnType = ColumnType::Int;

    fn from_sql_value(value: &SqlValue) -> Result<Self, String> {
        match value {
            SqlValue::Null => Ok(0),
            SqlValue::Int(v) => Ok(*v),
            SqlValue::Long(v) => Self::try_from(*v).map_err(|e| e.to_string()),
            SqlValue::Bool(v) => Ok(Self::from(*v)),
            other => Err(unexpected(other, Self::TYPE)),
        }
    }
}

impl ColumnValue for i64 {
    const TYPE: ColumnType = ColumnType::Long;

    fn from_sql_value(value: &SqlValue) -> Result<Self, String> {
        match value {
            SqlValue::Null => Ok(0),
            SqlValue::Int(v) => Ok(Self::from(*v)),
            SqlValue::Long(v) => Ok(*v),
            SqlValue::Bool(v) => Ok(Self::from(*v)),
            other => Err(unexpected(other, Self::TYPE)),
        }
    }
}

impl ColumnValue for f32 {
    const TYPE: ColumnType = ColumnType::Float;

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn from_sql_value(value: &SqlValue) -> Result<Self, String> {
        match value {
            SqlValue::Null => Ok(0.0),
            SqlValue::Float(v) => Ok(*v),
            SqlValue::Double(v) => Ok(*v as Self),
            SqlValue::Int(v) => Ok(*v as Self),
            SqlValue::Long(v) => Ok(*v as Self),
            other => Err(unexpected(other, Self::TYPE)),
        }
    }
}

impl ColumnValue for f64 {
    const TYPE: ColumnType = ColumnType::Double;

    #[allow(clippy::cast_precision_loss)]
    fn from_sql_value(value: &SqlValue) -> Result<Self, String> {
        match value {
            SqlValue::Null => Ok(0.0),
            SqlValue::Float(v) => Ok(Self::from(*v)),
            SqlValue::Double(v) => Ok(*v),
            SqlValue::Int(v) => Ok(Self::from(*v)),
            SqlValue::Long(v) => Ok(*v as Self),
            other => Err(unexpected(other, Self::TYPE)),
        }
    }
}

impl ColumnValue for Decimal {
    const TYPE: ColumnType = ColumnType::Decimal;

    fn from_sql_value(value: &SqlValue) -> Result<Self, String> {
        match value {
            SqlValue::Null => Ok(Self::ZERO),
            SqlValue::Decimal(v) => Ok(*v),
            SqlValue::Int(v) => Ok(Self::from(*v)),
            SqlValue::Long(v) => Ok(Self::from(*v)),
            SqlValue::Double(v) => Self::try_from(*v).map_err(|e| e.to_string()),
            SqlValue::Float(v) => Self::try_from(*v).map_err(|e| e.to_string()),
            SqlValue::Text(v) => Self::from_str(v).map_err(|e| e.to_string()),
            other @ SqlValue::Bool(_) => Err(unexpected(other, Self::TYPE)),
        }
    }
}

impl ColumnValue for bool {
    const TYPE: ColumnType = ColumnType::Boolean;

    fn from_sql_value(value: &SqlValue) -> Result<Self, String> {
        match value {
            SqlValue::Null => Ok(false),
            SqlValue::Bool(v) => Ok(*v),
            SqlValue::Int(v) => Ok(*v != 0),
            SqlValue::Long(v) => Ok(*v != 0),
            other => Err(unexpected(other, Self::TYPE)),
        }
    }
}

/// An optional argument for a column of type `T`.
///
/// Implemented for `T` itself, for `Option<T>` and for `&str` on text
/// columns. `None` is the null input that predicates skip and that inserts
/// omit.
pub trait IntoValue<T> {
    /// Returns the wrapped value, or `None` for null.
    fn into_value(self) -> Option<T>;
}

impl<T: ColumnValue> IntoValue<T> for T {
    fn into_value(self) -> Option<T> {
        Some(self)
    }
}

impl<T: ColumnValue> IntoValue<T> for Option<T> {
    fn into_value(self) -> Option<T> {
        self
    }
}

impl IntoValue<String> for &str {
    fn into_value(self) -> Option<String> {
        Some(String::from(self))
    }
}

impl IntoValue<String> for &String {
    fn into_value(self) -> Option<String> {
        Some(self.clone())
    }
}
