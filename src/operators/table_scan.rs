//! # **TableScan Module** - *Value-Predicate Filter Operator*
//!
//! Scans one column of the input table against a search value and emits
//! the matching row addresses as a reference table: one chunk, one
//! reference segment per column, all sharing a single position list into
//! the underlying base table.
//!
//! ## Segment paths
//! - **Value segments** are compared cell by cell over the dense buffer.
//! - **Dictionary segments** are never decompressed: the search value is
//!   translated into a value-id predicate via the dictionary's bound
//!   queries, and only the attribute vector is scanned. Chunks whose
//!   dictionary cannot contain a match are skipped outright; chunks that
//!   match entirely are emitted without comparing.
//! - **Reference segments** are walked through their position list, and
//!   matches emit the referenced row address itself, so a scan over a
//!   scan still points at the base table.

use std::sync::Arc;

use tracing::debug;

use crate::{
    Chunk, ChunkId, ChunkOffset, ColumnId, ColumnType, INVALID_VALUE_ID, Operator, OutputCache,
    PositionList, ReferenceSegment, RowId, ScanType, Segment, StorageError, Table, Value, ValueId,
    resolve_data_type,
};

/// How one chunk's dictionary segment is scanned, derived from the
/// bound-query results for the search value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ValueIdScan {
    /// No row can match; skip the chunk.
    EmptyResult,
    /// Every row matches; emit all positions without comparing.
    SelectEverything,
    /// Compare each attribute value against this pivot with the scan's
    /// own predicate. Signed and widened so that `-1` (pivot below the
    /// whole dictionary) and the invalid sentinel cannot collide.
    Compare(i64),
}

/// Translates the scan predicate into a value-id predicate.
///
/// `lower_bound == INVALID_VALUE_ID` means every dictionary entry is
/// smaller than the search value; `lower_bound == upper_bound == 0`
/// means every entry is greater. When the search value is absent from
/// the dictionary (`upper_bound == lower_bound` elsewhere), the lower
/// bound names the next greater entry, so the strict/inclusive cases
/// pivot one below it: `lower_bound - 1` is the last entry smaller than
/// the search value.
fn value_id_scan_plan(
    scan_type: ScanType,
    upper_bound: ValueId,
    lower_bound: ValueId,
) -> ValueIdScan {
    let pivot = lower_bound.0 as i64;
    match scan_type {
        ScanType::Equals => {
            if upper_bound != lower_bound {
                ValueIdScan::Compare(pivot)
            } else {
                ValueIdScan::EmptyResult
            }
        }
        ScanType::NotEquals => {
            if upper_bound != lower_bound {
                ValueIdScan::Compare(pivot)
            } else {
                ValueIdScan::SelectEverything
            }
        }
        ScanType::GreaterThanEquals => {
            if lower_bound == INVALID_VALUE_ID {
                ValueIdScan::EmptyResult
            } else if lower_bound == ValueId(0) {
                ValueIdScan::SelectEverything
            } else {
                ValueIdScan::Compare(pivot)
            }
        }
        ScanType::GreaterThan => {
            if upper_bound != lower_bound {
                ValueIdScan::Compare(pivot)
            } else if lower_bound == ValueId(0) {
                ValueIdScan::SelectEverything
            } else if lower_bound == INVALID_VALUE_ID {
                ValueIdScan::EmptyResult
            } else {
                ValueIdScan::Compare(pivot - 1)
            }
        }
        ScanType::LessThanEquals => {
            if upper_bound != lower_bound {
                ValueIdScan::Compare(pivot)
            } else if lower_bound == ValueId(0) {
                ValueIdScan::EmptyResult
            } else if lower_bound == INVALID_VALUE_ID {
                ValueIdScan::SelectEverything
            } else {
                ValueIdScan::Compare(pivot - 1)
            }
        }
        ScanType::LessThan => {
            if upper_bound == lower_bound && lower_bound == ValueId(0) {
                ValueIdScan::EmptyResult
            } else if upper_bound == lower_bound && lower_bound == INVALID_VALUE_ID {
                ValueIdScan::SelectEverything
            } else {
                ValueIdScan::Compare(pivot)
            }
        }
    }
}

/// # TableScan
///
/// Filter operator over one input operator's output table.
///
/// Fails on execute when the search value's element type does not match
/// the scanned column's, before any rows are visited.
pub struct TableScan {
    input: Arc<dyn Operator>,
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: Value,
    output: OutputCache,
}

impl TableScan {
    pub fn new(
        input: Arc<dyn Operator>,
        column_id: ColumnId,
        scan_type: ScanType,
        search_value: Value,
    ) -> Self {
        Self {
            input,
            column_id,
            scan_type,
            search_value,
            output: OutputCache::new(),
        }
    }

    /// The scanned column.
    #[inline]
    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// The comparison predicate.
    #[inline]
    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    /// The value each cell is compared against.
    #[inline]
    pub fn search_value(&self) -> &Value {
        &self.search_value
    }

    fn on_execute(&self) -> Result<Arc<Table>, StorageError> {
        let input_table = self.input.execute()?;
        let position_list = self.create_position_list(&input_table)?;

        debug!(
            column = self.column_id.0,
            predicate = %self.scan_type,
            matches = position_list.len(),
            "table scan complete"
        );

        // A reference-segment input already points into a base table;
        // the output must reference that table, not the intermediate.
        let base_table = match input_table.chunk(ChunkId(0)).segments().first() {
            Some(Segment::Reference(reference)) => reference.referenced_table().clone(),
            _ => input_table,
        };
        Self::reference_output(&base_table, position_list)
    }

    /// Builds the single-chunk output table: one reference segment per
    /// column of `base_table`, all sharing `position_list`.
    fn reference_output(
        base_table: &Arc<Table>,
        position_list: PositionList,
    ) -> Result<Arc<Table>, StorageError> {
        let position_list = Arc::new(position_list);
        let mut chunk = Chunk::new();
        let mut output = Table::new(base_table.target_chunk_size());

        for column_index in 0..base_table.column_count() {
            let column_id = ColumnId(column_index as u16);
            chunk.add_segment(Segment::from(ReferenceSegment::new(
                base_table.clone(),
                column_id,
                position_list.clone(),
            )))?;
            output.add_column(
                base_table.column_name(column_id),
                base_table.column_type(column_id).tag(),
            )?;
        }
        output.emplace_chunk(chunk)?;
        Ok(Arc::new(output))
    }

    /// Walks every chunk of the input and collects matching positions.
    fn create_position_list(&self, input_table: &Table) -> Result<PositionList, StorageError> {
        let mut position_list = PositionList::new();
        let column_type = input_table.column_type(self.column_id);

        resolve_data_type!(column_type, T, {
            // Rejects tag disagreement before any chunk is visited.
            let search_value: T = self.search_value.cast()?;

            for chunk_index in 0..input_table.chunk_count() {
                let chunk_id = ChunkId(chunk_index as u32);
                let segment = input_table.chunk(chunk_id).segment(self.column_id);

                match segment {
                    Segment::Value(values) => {
                        let Some(typed) = T::from_value_array(values) else {
                            return Err(StorageError::TypeMismatch {
                                expected: T::DATA_TYPE,
                                found: values.data_type(),
                            });
                        };
                        for (offset, cell) in typed.values().iter().enumerate() {
                            if self.scan_type.compare(cell, &search_value) {
                                position_list
                                    .push(RowId::new(chunk_id, ChunkOffset(offset as u32)));
                            }
                        }
                    }
                    Segment::Dictionary(dictionary) => {
                        let Some(typed) = T::from_dictionary_array(dictionary) else {
                            return Err(StorageError::TypeMismatch {
                                expected: T::DATA_TYPE,
                                found: dictionary.data_type(),
                            });
                        };
                        let upper_bound = typed.upper_bound(&search_value);
                        let lower_bound = typed.lower_bound(&search_value);

                        match value_id_scan_plan(self.scan_type, upper_bound, lower_bound) {
                            ValueIdScan::EmptyResult => continue,
                            ValueIdScan::SelectEverything => {
                                for offset in 0..typed.len() {
                                    position_list
                                        .push(RowId::new(chunk_id, ChunkOffset(offset as u32)));
                                }
                            }
                            ValueIdScan::Compare(pivot) => {
                                let attribute_vector = typed.attribute_vector();
                                for offset in 0..attribute_vector.len() {
                                    let value_id = attribute_vector.get(offset).0 as i64;
                                    if self.scan_type.compare(&value_id, &pivot) {
                                        position_list
                                            .push(RowId::new(chunk_id, ChunkOffset(offset as u32)));
                                    }
                                }
                            }
                        }
                    }
                    Segment::Reference(reference) => {
                        let referenced_table = reference.referenced_table();
                        for row_id in reference.pos_list().iter() {
                            let cell = referenced_table
                                .chunk(row_id.chunk_id)
                                .segment(reference.referenced_column_id())
                                .value_at(row_id.chunk_offset.to_usize());
                            if self.scan_type.compare(&cell.cast::<T>()?, &search_value) {
                                position_list.push(*row_id);
                            }
                        }
                    }
                }
            }
            Ok(position_list)
        })
    }
}

impl Operator for TableScan {
    fn execute(&self) -> Result<Arc<Table>, StorageError> {
        self.output.get_or_execute(|| self.on_execute())
    }

    fn get_output(&self) -> Option<Arc<Table>> {
        self.output.get()
    }

    fn left_input(&self) -> Option<&Arc<dyn Operator>> {
        Some(&self.input)
    }
}
