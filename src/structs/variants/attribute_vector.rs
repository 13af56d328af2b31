//! # **AttributeVector Module** - *Width-Polymorphic Value-Id Storage*
//!
//! One value id per row of a dictionary-compressed segment, stored in the
//! narrowest unsigned lane the dictionary cardinality allows.
//!
//! The lane is picked once at build time; 1 byte covers dictionaries up
//! to 2^8 entries, 2 bytes up to 2^16, 4 bytes beyond that. Stores are
//! width-truncating, so the invalid sentinel lands on the lane's maximum
//! rather than wrapping onto a small valid id.

use crate::{Integer, ValueId};

/// # FixedSizeAttributeVector
///
/// Value-id vector over one concrete lane type.
///
/// ### Fields
/// - `attributes`: one lane value per row; index = chunk offset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedSizeAttributeVector<T: Integer> {
    attributes: Vec<T>,
}

impl<T: Integer> FixedSizeAttributeVector<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            attributes: Vec::with_capacity(capacity),
        }
    }

    /// The value id at `position`.
    ///
    /// Panics when `position` is out of range.
    #[inline]
    pub fn get(&self, position: usize) -> ValueId {
        self.attributes[position].to_value_id()
    }

    /// Overwrites the value id at `position`, truncated to the lane width.
    ///
    /// Panics when `position` is out of range.
    #[inline]
    pub fn set(&mut self, position: usize, value_id: ValueId) {
        assert!(
            position < self.attributes.len(),
            "attribute position {} out of range ({} rows)",
            position,
            self.attributes.len()
        );
        self.attributes[position] = T::from_value_id(value_id);
    }

    /// Appends a value id, truncated to the lane width.
    #[inline]
    pub fn push(&mut self, value_id: ValueId) {
        self.attributes.push(T::from_value_id(value_id));
    }

    /// Number of stored value ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Bytes per stored value id.
    #[inline]
    pub fn width(&self) -> u8 {
        size_of::<T>() as u8
    }
}

/// # AttributeVector
///
/// Lane-width dispatch over [`FixedSizeAttributeVector`].
///
/// The dictionary segment builder selects the variant; everything
/// downstream goes through this enum so scan loops stay width-agnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeVector {
    Width1(FixedSizeAttributeVector<u8>),
    Width2(FixedSizeAttributeVector<u16>),
    Width4(FixedSizeAttributeVector<u32>),
}

impl AttributeVector {
    /// Picks the narrowest lane that can hold ids for `unique_values`
    /// dictionary entries, pre-sized for `capacity` rows.
    pub fn for_cardinality(unique_values: usize, capacity: usize) -> Self {
        if unique_values <= 1 << 8 {
            AttributeVector::Width1(FixedSizeAttributeVector::with_capacity(capacity))
        } else if unique_values <= 1 << 16 {
            AttributeVector::Width2(FixedSizeAttributeVector::with_capacity(capacity))
        } else {
            AttributeVector::Width4(FixedSizeAttributeVector::with_capacity(capacity))
        }
    }

    /// The value id at `position`. Panics when out of range.
    #[inline]
    pub fn get(&self, position: usize) -> ValueId {
        match self {
            AttributeVector::Width1(v) => v.get(position),
            AttributeVector::Width2(v) => v.get(position),
            AttributeVector::Width4(v) => v.get(position),
        }
    }

    /// Overwrites the value id at `position`. Panics when out of range.
    #[inline]
    pub fn set(&mut self, position: usize, value_id: ValueId) {
        match self {
            AttributeVector::Width1(v) => v.set(position, value_id),
            AttributeVector::Width2(v) => v.set(position, value_id),
            AttributeVector::Width4(v) => v.set(position, value_id),
        }
    }

    /// Appends a value id.
    #[inline]
    pub fn push(&mut self, value_id: ValueId) {
        match self {
            AttributeVector::Width1(v) => v.push(value_id),
            AttributeVector::Width2(v) => v.push(value_id),
            AttributeVector::Width4(v) => v.push(value_id),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            AttributeVector::Width1(v) => v.len(),
            AttributeVector::Width2(v) => v.len(),
            AttributeVector::Width4(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per stored value id: 1, 2 or 4.
    #[inline]
    pub fn width(&self) -> u8 {
        match self {
            AttributeVector::Width1(v) => v.width(),
            AttributeVector::Width2(v) => v.width(),
            AttributeVector::Width4(v) => v.width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INVALID_VALUE_ID;

    #[test]
    fn width_is_minimal_for_cardinality() {
        assert_eq!(AttributeVector::for_cardinality(1, 0).width(), 1);
        assert_eq!(AttributeVector::for_cardinality(200, 0).width(), 1);
        assert_eq!(AttributeVector::for_cardinality(256, 0).width(), 1);
        assert_eq!(AttributeVector::for_cardinality(257, 0).width(), 2);
        assert_eq!(AttributeVector::for_cardinality(65_536, 0).width(), 2);
        assert_eq!(AttributeVector::for_cardinality(65_537, 0).width(), 4);
    }

    #[test]
    fn get_set_round_trip() {
        let mut vector = AttributeVector::for_cardinality(200, 3);
        vector.push(ValueId(0));
        vector.push(ValueId(1));
        vector.push(ValueId(199));
        assert_eq!(vector.len(), 3);
        assert_eq!(vector.get(2), ValueId(199));

        vector.set(0, ValueId(42));
        assert_eq!(vector.get(0), ValueId(42));
    }

    #[test]
    fn sentinel_truncates_to_lane_maximum() {
        let mut vector = AttributeVector::for_cardinality(2, 1);
        vector.push(INVALID_VALUE_ID);
        assert_eq!(vector.get(0), ValueId(u8::MAX as u32));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_out_of_range_panics() {
        let mut vector = AttributeVector::for_cardinality(2, 0);
        vector.set(0, ValueId(0));
    }

    #[test]
    #[should_panic]
    fn get_out_of_range_panics() {
        let vector = AttributeVector::for_cardinality(2, 0);
        vector.get(0);
    }
}
