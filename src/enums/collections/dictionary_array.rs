//! # **DictionaryArray Module** - *Typed Dispatch over Compressed Segments*
//!
//! Unifies the five [`DictionarySegment`] instantiations so compressed
//! chunks hold columns of mixed element types behind one variant, while
//! scans reach the shared attribute vector and bound queries without
//! caring about the element type.

use crate::{
    AttributeVector, ColumnType, DataType, DictionarySegment, Segment, StorageError, Value,
    ValueId, resolve_data_type,
};

/// # DictionaryArray
///
/// Element-type dispatch over [`DictionarySegment`].
#[derive(Clone, Debug, PartialEq)]
pub enum DictionaryArray {
    Int32(DictionarySegment<i32>),
    Int64(DictionarySegment<i64>),
    Float32(DictionarySegment<f32>),
    Float64(DictionarySegment<f64>),
    String(DictionarySegment<String>),
}

impl DictionaryArray {
    /// Compresses `segment` into a dictionary segment of `data_type`.
    ///
    /// The tag must match the segment's element type.
    pub fn from_segment(data_type: DataType, segment: &Segment) -> Result<Self, StorageError> {
        resolve_data_type!(data_type, T, {
            Ok(DictionaryArray::from(DictionarySegment::<T>::from_segment(
                segment,
            )?))
        })
    }

    /// Element type of the wrapped segment.
    #[inline]
    pub fn data_type(&self) -> DataType {
        match self {
            DictionaryArray::Int32(_) => DataType::Int32,
            DictionaryArray::Int64(_) => DataType::Int64,
            DictionaryArray::Float32(_) => DataType::Float32,
            DictionaryArray::Float64(_) => DataType::Float64,
            DictionaryArray::String(_) => DataType::String,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            DictionaryArray::Int32(segment) => segment.len(),
            DictionaryArray::Int64(segment) => segment.len(),
            DictionaryArray::Float32(segment) => segment.len(),
            DictionaryArray::Float64(segment) => segment.len(),
            DictionaryArray::String(segment) => segment.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The decompressed cell at `offset`. Panics out of range.
    #[inline]
    pub fn value_at(&self, offset: usize) -> Value {
        match self {
            DictionaryArray::Int32(segment) => segment.value_at(offset),
            DictionaryArray::Int64(segment) => segment.value_at(offset),
            DictionaryArray::Float32(segment) => segment.value_at(offset),
            DictionaryArray::Float64(segment) => segment.value_at(offset),
            DictionaryArray::String(segment) => segment.value_at(offset),
        }
    }

    /// Number of distinct values.
    #[inline]
    pub fn unique_values_count(&self) -> usize {
        match self {
            DictionaryArray::Int32(segment) => segment.unique_values_count(),
            DictionaryArray::Int64(segment) => segment.unique_values_count(),
            DictionaryArray::Float32(segment) => segment.unique_values_count(),
            DictionaryArray::Float64(segment) => segment.unique_values_count(),
            DictionaryArray::String(segment) => segment.unique_values_count(),
        }
    }

    /// The per-row value ids.
    #[inline]
    pub fn attribute_vector(&self) -> &AttributeVector {
        match self {
            DictionaryArray::Int32(segment) => segment.attribute_vector(),
            DictionaryArray::Int64(segment) => segment.attribute_vector(),
            DictionaryArray::Float32(segment) => segment.attribute_vector(),
            DictionaryArray::Float64(segment) => segment.attribute_vector(),
            DictionaryArray::String(segment) => segment.attribute_vector(),
        }
    }

    /// Variant-accepting lower bound; tag equality required.
    pub fn lower_bound(&self, value: &Value) -> Result<ValueId, StorageError> {
        match self {
            DictionaryArray::Int32(segment) => segment.lower_bound_value(value),
            DictionaryArray::Int64(segment) => segment.lower_bound_value(value),
            DictionaryArray::Float32(segment) => segment.lower_bound_value(value),
            DictionaryArray::Float64(segment) => segment.lower_bound_value(value),
            DictionaryArray::String(segment) => segment.lower_bound_value(value),
        }
    }

    /// Variant-accepting upper bound; tag equality required.
    pub fn upper_bound(&self, value: &Value) -> Result<ValueId, StorageError> {
        match self {
            DictionaryArray::Int32(segment) => segment.upper_bound_value(value),
            DictionaryArray::Int64(segment) => segment.upper_bound_value(value),
            DictionaryArray::Float32(segment) => segment.upper_bound_value(value),
            DictionaryArray::Float64(segment) => segment.upper_bound_value(value),
            DictionaryArray::String(segment) => segment.upper_bound_value(value),
        }
    }

    /// The dictionary entry behind a value id, wrapped in a variant.
    /// Panics when the id is out of range.
    pub fn value_by_value_id(&self, value_id: ValueId) -> Value {
        match self {
            DictionaryArray::Int32(segment) => {
                segment.value_by_value_id(value_id).clone().into_value()
            }
            DictionaryArray::Int64(segment) => {
                segment.value_by_value_id(value_id).clone().into_value()
            }
            DictionaryArray::Float32(segment) => {
                segment.value_by_value_id(value_id).clone().into_value()
            }
            DictionaryArray::Float64(segment) => {
                segment.value_by_value_id(value_id).clone().into_value()
            }
            DictionaryArray::String(segment) => {
                segment.value_by_value_id(value_id).clone().into_value()
            }
        }
    }

    /// Dictionary bytes plus attribute vector bytes.
    #[inline]
    pub fn estimate_memory_usage(&self) -> usize {
        match self {
            DictionaryArray::Int32(segment) => segment.estimate_memory_usage(),
            DictionaryArray::Int64(segment) => segment.estimate_memory_usage(),
            DictionaryArray::Float32(segment) => segment.estimate_memory_usage(),
            DictionaryArray::Float64(segment) => segment.estimate_memory_usage(),
            DictionaryArray::String(segment) => segment.estimate_memory_usage(),
        }
    }
}

macro_rules! impl_from_dictionary_segment {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<DictionarySegment<$t>> for DictionaryArray {
                #[inline]
                fn from(segment: DictionarySegment<$t>) -> Self {
                    DictionaryArray::$variant(segment)
                }
            }
        )*
    };
}

impl_from_dictionary_segment!(
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ValueArray, ValueSegment};

    fn compressed_ints() -> DictionaryArray {
        let segment = Segment::Value(ValueArray::from(ValueSegment::from(vec![10i32, 20, 30])));
        DictionaryArray::from_segment(DataType::Int32, &segment).unwrap()
    }

    #[test]
    fn from_segment_resolves_element_type() {
        let array = compressed_ints();
        assert_eq!(array.data_type(), DataType::Int32);
        assert_eq!(array.len(), 3);
        assert_eq!(array.unique_values_count(), 3);
        assert_eq!(array.value_at(1), Value::from(20i32));
        assert_eq!(array.value_by_value_id(ValueId(2)), Value::from(30i32));
    }

    #[test]
    fn from_segment_rejects_wrong_tag() {
        let segment = Segment::Value(ValueArray::from(ValueSegment::from(vec![1i32])));
        assert!(DictionaryArray::from_segment(DataType::String, &segment).is_err());
    }

    #[test]
    fn bounds_go_through_the_variant_surface() {
        let array = compressed_ints();
        assert_eq!(array.lower_bound(&Value::from(15i32)).unwrap(), ValueId(1));
        assert_eq!(array.upper_bound(&Value::from(15i32)).unwrap(), ValueId(1));
        assert!(array.lower_bound(&Value::from(15i64)).is_err());
    }
}
