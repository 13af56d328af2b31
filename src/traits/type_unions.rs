//! # **Type Unions Module** - *Element and Lane Type Traits*
//!
//! Two small trait universes keep the engine's generics closed:
//!
//! - [`ColumnType`] — the five element types a column can hold. Bridges
//!   the untyped [`Value`] surface and the typed segment internals, and
//!   carries the total ordering used by dictionary construction.
//! - [`Integer`] — the unsigned lane types (`u8`/`u16`/`u32`) an
//!   attribute vector can store value ids in.

use std::cmp::Ordering;
use std::fmt::Debug;

use num_traits::PrimInt;

use crate::{
    DataType, DictionaryArray, DictionarySegment, StorageError, Value, ValueArray, ValueId,
    ValueSegment,
};

/// Trait for types valid as column elements.
///
/// Implemented for exactly `i32`, `i64`, `f32`, `f64` and `String`; the
/// set is closed by design of the type system.
pub trait ColumnType: Clone + Debug + PartialEq + PartialOrd + Send + Sync + 'static {
    /// The tag this element type corresponds to.
    const DATA_TYPE: DataType;

    /// Extracts the typed payload from a variant, failing on tag
    /// disagreement. No coercion.
    fn from_value(value: &Value) -> Result<Self, StorageError>;

    /// Wraps the element back into a variant.
    fn into_value(self) -> Value;

    /// Total ordering over elements.
    ///
    /// Matches `Ord` where one exists; floats use the IEEE total order so
    /// dictionary sorting and binary search never hit an incomparable
    /// pair.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Typed view into a value array, when the element types line up.
    fn from_value_array(array: &ValueArray) -> Option<&ValueSegment<Self>>;

    /// Typed view into a dictionary array, when the element types line up.
    fn from_dictionary_array(array: &DictionaryArray) -> Option<&DictionarySegment<Self>>;
}

macro_rules! impl_column_type {
    ($t:ty, $variant:ident, |$a:ident, $b:ident| $cmp:expr) => {
        impl ColumnType for $t {
            const DATA_TYPE: DataType = DataType::$variant;

            #[inline]
            fn from_value(value: &Value) -> Result<Self, StorageError> {
                match value {
                    Value::$variant(v) => Ok(v.clone()),
                    other => Err(StorageError::TypeMismatch {
                        expected: DataType::$variant,
                        found: other.data_type(),
                    }),
                }
            }

            #[inline]
            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                let ($a, $b) = (self, other);
                $cmp
            }

            #[inline]
            fn from_value_array(array: &ValueArray) -> Option<&ValueSegment<Self>> {
                match array {
                    ValueArray::$variant(segment) => Some(segment),
                    _ => None,
                }
            }

            #[inline]
            fn from_dictionary_array(array: &DictionaryArray) -> Option<&DictionarySegment<Self>> {
                match array {
                    DictionaryArray::$variant(segment) => Some(segment),
                    _ => None,
                }
            }
        }
    };
}

impl_column_type!(i32, Int32, |a, b| Ord::cmp(a, b));
impl_column_type!(i64, Int64, |a, b| Ord::cmp(a, b));
impl_column_type!(f32, Float32, |a, b| f32::total_cmp(a, b));
impl_column_type!(f64, Float64, |a, b| f64::total_cmp(a, b));
impl_column_type!(String, String, |a, b| Ord::cmp(a, b));

/// Trait for types valid as attribute vector lanes.
///
/// Value ids are stored width-truncated, so a lane reproduces any id that
/// fits its width and maps the invalid sentinel onto its own maximum.
pub trait Integer: PrimInt + Default + Debug + Send + Sync + 'static {
    /// Lossless cast to `usize`.
    fn to_usize(self) -> usize;

    /// Width-truncating cast from a value id.
    fn from_value_id(value_id: ValueId) -> Self;

    /// Widening cast back to a value id.
    fn to_value_id(self) -> ValueId;
}

macro_rules! impl_lane_integer {
    ($($t:ty),*) => {
        $(
            impl Integer for $t {
                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_value_id(value_id: ValueId) -> Self {
                    value_id.0 as $t
                }

                #[inline]
                fn to_value_id(self) -> ValueId {
                    ValueId(self as u32)
                }
            }
        )*
    };
}

impl_lane_integer!(u8, u16, u32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INVALID_VALUE_ID;

    #[test]
    fn float_total_order_handles_nan() {
        let nan = f64::NAN;
        assert_eq!(ColumnType::total_cmp(&nan, &nan), Ordering::Equal);
        assert_eq!(ColumnType::total_cmp(&1.0f64, &nan), Ordering::Less);
    }

    #[test]
    fn lane_truncation_keeps_sentinel_at_max() {
        assert_eq!(u8::from_value_id(INVALID_VALUE_ID), u8::MAX);
        assert_eq!(u16::from_value_id(INVALID_VALUE_ID), u16::MAX);
        assert_eq!(u32::from_value_id(INVALID_VALUE_ID), u32::MAX);
        assert_eq!(u8::from_value_id(ValueId(3)).to_value_id(), ValueId(3));
    }

    #[test]
    fn from_value_refuses_cross_tag() {
        assert!(i64::from_value(&Value::Int32(1)).is_err());
        assert_eq!(String::from_value(&Value::from("x")).unwrap(), "x");
    }
}
