//! # **Value Module** - *Single Cell Value Container*
//!
//! Contains the `Value` enum, a tagged container for any one cell of any
//! supported column type.
//!
//! ## Purpose
//! Rows travel through the untyped surface (`Table::append`,
//! `Chunk::append`, segment reads, scan search values) as `Value`s, while
//! the hot inner loops work on the concrete element types. `cast`
//! recovers the typed payload and fails when the tags disagree.
//!
//! ## Supports
//! - `From` conversions from each element type (plus `&str`)
//! - tag-checked extraction via [`Value::cast`]
//! - equality comparison and display across all variants

use std::fmt::{Display, Formatter};

use crate::{ColumnType, DataType, StorageError};

/// # Value
///
/// One cell of one column, tagged with its element type.
///
/// ## Details
/// - Wraps exactly one payload from the closed [`DataType`] universe.
/// - Cheap to clone for every variant except long strings.
/// - Comparison semantics live on the element types, not here; a `Value`
///   is a transport container, so it only exposes equality.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
}

impl Value {
    /// Tag of the active payload.
    #[inline]
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int32(_) => DataType::Int32,
            Value::Int64(_) => DataType::Int64,
            Value::Float32(_) => DataType::Float32,
            Value::Float64(_) => DataType::Float64,
            Value::String(_) => DataType::String,
        }
    }

    /// Converts the active payload to the requested element type.
    ///
    /// Fails with [`StorageError::TypeMismatch`] when the tags disagree;
    /// no numeric coercion is performed.
    #[inline]
    pub fn cast<T: ColumnType>(&self) -> Result<T, StorageError> {
        T::from_value(self)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_tracks_variant() {
        assert_eq!(Value::from(1i32).data_type(), DataType::Int32);
        assert_eq!(Value::from(1i64).data_type(), DataType::Int64);
        assert_eq!(Value::from(1.0f32).data_type(), DataType::Float32);
        assert_eq!(Value::from(1.0f64).data_type(), DataType::Float64);
        assert_eq!(Value::from("one").data_type(), DataType::String);
    }

    #[test]
    fn cast_requires_matching_tag() {
        let value = Value::from(42i32);
        assert_eq!(value.cast::<i32>().unwrap(), 42);
        assert_eq!(
            value.cast::<i64>().unwrap_err(),
            StorageError::TypeMismatch {
                expected: DataType::Int64,
                found: DataType::Int32,
            }
        );
        // No silent float -> int coercion either.
        assert!(Value::from(3.14f64).cast::<i32>().is_err());
    }

    #[test]
    fn display_is_bare() {
        assert_eq!(format!("{}", Value::from("Hello,")), "Hello,");
        assert_eq!(format!("{}", Value::from(7i64)), "7");
    }
}
