//! # **DictionarySegment Module** - *Immutable Dictionary-Compressed Segment*
//!
//! Compressed representation of one column segment: a sorted,
//! duplicate-free dictionary of the distinct values plus a bit-width
//! minimal attribute vector mapping every row to its dictionary index.
//!
//! ## Construction
//! 1. Materialise the source segment's values.
//! 2. Sort ascending (total order) and drop consecutive duplicates.
//! 3. Pick the attribute lane from the dictionary cardinality.
//! 4. Binary-search each original value and store its index.
//!
//! ## Bound queries
//! `lower_bound`/`upper_bound` answer "first dictionary index with an
//! entry `>=` / `>` the probe", returning [`INVALID_VALUE_ID`] when no
//! entry qualifies. Scans use the pair to translate value predicates into
//! value-id predicates without touching the dictionary per row.
//!
//! Dictionary segments are immutable after construction; row appends are
//! rejected at the segment dispatch layer.

use std::cmp::Ordering;

use crate::{
    AttributeVector, ColumnType, INVALID_VALUE_ID, Segment, StorageError, Value, ValueId,
    ValueSegment,
};

/// # DictionarySegment
///
/// Immutable compressed column segment.
///
/// ### Fields
/// - `dictionary`: sorted, duplicate-free distinct values.
/// - `attribute_vector`: per-row dictionary indices, lane-width minimal.
#[derive(Clone, Debug, PartialEq)]
pub struct DictionarySegment<T: ColumnType> {
    dictionary: Vec<T>,
    attribute_vector: AttributeVector,
}

impl<T: ColumnType> DictionarySegment<T> {
    /// Compresses a typed value segment.
    pub fn from_value_segment(segment: &ValueSegment<T>) -> Self {
        Self::from_values(segment.values().to_vec())
    }

    /// Compresses any segment of matching element type.
    ///
    /// Fails with a type mismatch when the segment holds a different
    /// element type.
    pub fn from_segment(segment: &Segment) -> Result<Self, StorageError> {
        if segment.data_type() != T::DATA_TYPE {
            return Err(StorageError::TypeMismatch {
                expected: T::DATA_TYPE,
                found: segment.data_type(),
            });
        }
        if let Segment::Value(values) = segment {
            if let Some(typed) = T::from_value_array(values) {
                return Ok(Self::from_value_segment(typed));
            }
        }
        let mut materialized = Vec::with_capacity(segment.len());
        for offset in 0..segment.len() {
            materialized.push(T::from_value(&segment.value_at(offset))?);
        }
        Ok(Self::from_values(materialized))
    }

    fn from_values(values: Vec<T>) -> Self {
        let mut dictionary = values.clone();
        dictionary.sort_unstable_by(|a, b| a.total_cmp(b));
        dictionary.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
        dictionary.shrink_to_fit();

        let mut attribute_vector = AttributeVector::for_cardinality(dictionary.len(), values.len());
        for value in &values {
            let index = dictionary.partition_point(|entry| entry.total_cmp(value) == Ordering::Less);
            attribute_vector.push(ValueId(index as u32));
        }

        Self {
            dictionary,
            attribute_vector,
        }
    }

    /// The decompressed value at `chunk_offset`.
    ///
    /// Panics when `chunk_offset` is out of range.
    #[inline]
    pub fn get(&self, chunk_offset: usize) -> T {
        self.dictionary[self.attribute_vector.get(chunk_offset).to_usize()].clone()
    }

    /// Same as [`get`](Self::get), wrapped in a variant.
    #[inline]
    pub fn value_at(&self, chunk_offset: usize) -> Value {
        self.get(chunk_offset).into_value()
    }

    /// The dictionary entry a value id refers to.
    ///
    /// Panics when `value_id` is out of range.
    #[inline]
    pub fn value_by_value_id(&self, value_id: ValueId) -> &T {
        &self.dictionary[value_id.to_usize()]
    }

    /// First dictionary index with an entry `>=` the probe, or
    /// [`INVALID_VALUE_ID`] when every entry is smaller.
    pub fn lower_bound(&self, value: &T) -> ValueId {
        let index = self
            .dictionary
            .partition_point(|entry| entry.total_cmp(value) == Ordering::Less);
        if index == self.dictionary.len() {
            INVALID_VALUE_ID
        } else {
            ValueId(index as u32)
        }
    }

    /// First dictionary index with an entry `>` the probe, or
    /// [`INVALID_VALUE_ID`] when every entry is smaller or equal.
    pub fn upper_bound(&self, value: &T) -> ValueId {
        let index = self
            .dictionary
            .partition_point(|entry| entry.total_cmp(value) != Ordering::Greater);
        if index == self.dictionary.len() {
            INVALID_VALUE_ID
        } else {
            ValueId(index as u32)
        }
    }

    /// Variant-accepting [`lower_bound`](Self::lower_bound); the probe's
    /// tag must match the element type.
    pub fn lower_bound_value(&self, value: &Value) -> Result<ValueId, StorageError> {
        Ok(self.lower_bound(&T::from_value(value)?))
    }

    /// Variant-accepting [`upper_bound`](Self::upper_bound); the probe's
    /// tag must match the element type.
    pub fn upper_bound_value(&self, value: &Value) -> Result<ValueId, StorageError> {
        Ok(self.upper_bound(&T::from_value(value)?))
    }

    /// Number of distinct values.
    #[inline]
    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.attribute_vector.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attribute_vector.is_empty()
    }

    /// The sorted dictionary.
    #[inline]
    pub fn dictionary(&self) -> &[T] {
        &self.dictionary
    }

    /// The per-row value ids.
    #[inline]
    pub fn attribute_vector(&self) -> &AttributeVector {
        &self.attribute_vector
    }

    /// Dictionary bytes plus attribute vector bytes.
    #[inline]
    pub fn estimate_memory_usage(&self) -> usize {
        size_of::<T>() * self.dictionary.len()
            + self.attribute_vector.width() as usize * self.attribute_vector.len()
    }
}
