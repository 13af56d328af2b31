//! # **ReferenceSegment Module** - *Position-List Indirection Segment*
//!
//! A reference segment stores no cell data of its own: it holds a shared
//! position list and resolves reads through the referenced table's
//! column. Every reference segment produced by one scan shares the same
//! position list.
//!
//! The referenced table must itself be free of reference segments, so a
//! read is always a single indirection.

use std::sync::Arc;

use crate::{ColumnId, DataType, PositionList, Table, Value};

/// # ReferenceSegment
///
/// Immutable indirection segment.
///
/// ### Fields
/// - `referenced_table`: shared handle to the underlying base table.
/// - `referenced_column_id`: the column this segment reads from.
/// - `position_list`: shared row addresses; index = chunk offset.
#[derive(Clone, Debug)]
pub struct ReferenceSegment {
    referenced_table: Arc<Table>,
    referenced_column_id: ColumnId,
    position_list: Arc<PositionList>,
}

impl ReferenceSegment {
    #[inline]
    pub fn new(
        referenced_table: Arc<Table>,
        referenced_column_id: ColumnId,
        position_list: Arc<PositionList>,
    ) -> Self {
        Self {
            referenced_table,
            referenced_column_id,
            position_list,
        }
    }

    /// Resolves the cell at `chunk_offset` through the position list.
    ///
    /// Panics when `chunk_offset` is out of range.
    pub fn value_at(&self, chunk_offset: usize) -> Value {
        let position = self.position_list[chunk_offset];
        self.referenced_table
            .chunk(position.chunk_id)
            .segment(self.referenced_column_id)
            .value_at(position.chunk_offset.to_usize())
    }

    /// Element type of the referenced column.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.referenced_table.column_type(self.referenced_column_id)
    }

    /// Number of referenced rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.position_list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position_list.is_empty()
    }

    /// The shared position list.
    #[inline]
    pub fn pos_list(&self) -> &Arc<PositionList> {
        &self.position_list
    }

    /// The referenced base table.
    #[inline]
    pub fn referenced_table(&self) -> &Arc<Table> {
        &self.referenced_table
    }

    #[inline]
    pub fn referenced_column_id(&self) -> ColumnId {
        self.referenced_column_id
    }

    /// Position list bytes; the cell data is owned by the referenced table.
    #[inline]
    pub fn estimate_memory_usage(&self) -> usize {
        size_of::<crate::RowId>() * self.position_list.len()
    }
}
