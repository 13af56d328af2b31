//! # **ValueArray Module** - *Typed Dispatch over Mutable Segments*
//!
//! Unifies the five [`ValueSegment`] instantiations into a single enum so
//! chunks and tables can hold columns of mixed element types while scans
//! still reach the dense typed buffers.

use crate::{DataType, StorageError, Value, ValueSegment};

/// # ValueArray
///
/// Element-type dispatch over [`ValueSegment`].
#[derive(Clone, Debug, PartialEq)]
pub enum ValueArray {
    Int32(ValueSegment<i32>),
    Int64(ValueSegment<i64>),
    Float32(ValueSegment<f32>),
    Float64(ValueSegment<f64>),
    String(ValueSegment<String>),
}

impl ValueArray {
    /// An empty segment of the given element type.
    pub fn new_empty(data_type: DataType) -> Self {
        match data_type {
            DataType::Int32 => ValueArray::Int32(ValueSegment::new()),
            DataType::Int64 => ValueArray::Int64(ValueSegment::new()),
            DataType::Float32 => ValueArray::Float32(ValueSegment::new()),
            DataType::Float64 => ValueArray::Float64(ValueSegment::new()),
            DataType::String => ValueArray::String(ValueSegment::new()),
        }
    }

    /// Element type of the wrapped segment.
    #[inline]
    pub fn data_type(&self) -> DataType {
        match self {
            ValueArray::Int32(_) => DataType::Int32,
            ValueArray::Int64(_) => DataType::Int64,
            ValueArray::Float32(_) => DataType::Float32,
            ValueArray::Float64(_) => DataType::Float64,
            ValueArray::String(_) => DataType::String,
        }
    }

    /// Number of appended rows.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            ValueArray::Int32(segment) => segment.len(),
            ValueArray::Int64(segment) => segment.len(),
            ValueArray::Float32(segment) => segment.len(),
            ValueArray::Float64(segment) => segment.len(),
            ValueArray::String(segment) => segment.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cell at `offset`, wrapped in a variant. Panics out of range.
    #[inline]
    pub fn value_at(&self, offset: usize) -> Value {
        match self {
            ValueArray::Int32(segment) => segment.value_at(offset),
            ValueArray::Int64(segment) => segment.value_at(offset),
            ValueArray::Float32(segment) => segment.value_at(offset),
            ValueArray::Float64(segment) => segment.value_at(offset),
            ValueArray::String(segment) => segment.value_at(offset),
        }
    }

    /// Appends a variant, failing on tag disagreement.
    #[inline]
    pub fn append(&mut self, value: &Value) -> Result<(), StorageError> {
        match self {
            ValueArray::Int32(segment) => segment.append(value),
            ValueArray::Int64(segment) => segment.append(value),
            ValueArray::Float32(segment) => segment.append(value),
            ValueArray::Float64(segment) => segment.append(value),
            ValueArray::String(segment) => segment.append(value),
        }
    }

    /// Best-effort heap footprint.
    #[inline]
    pub fn estimate_memory_usage(&self) -> usize {
        match self {
            ValueArray::Int32(segment) => segment.estimate_memory_usage(),
            ValueArray::Int64(segment) => segment.estimate_memory_usage(),
            ValueArray::Float32(segment) => segment.estimate_memory_usage(),
            ValueArray::Float64(segment) => segment.estimate_memory_usage(),
            ValueArray::String(segment) => segment.estimate_memory_usage(),
        }
    }
}

macro_rules! impl_from_value_segment {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<ValueSegment<$t>> for ValueArray {
                #[inline]
                fn from(segment: ValueSegment<$t>) -> Self {
                    ValueArray::$variant(segment)
                }
            }
        )*
    };
}

impl_from_value_segment!(
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String
);
