//! End-to-end operator pipeline tests: registry lookup, scan chaining,
//! and equivalence of the scan across segment representations.

use std::sync::Arc;

use shale::{
    ChunkId, ChunkOffset, ColumnId, GetTable, Operator, OutputCache, RowId, ScanType, Segment,
    StorageError, StorageManager, Table, TableScan, Value,
};

/// Feeds a prebuilt table into a pipeline without touching the registry.
struct TableWrapper {
    table: Arc<Table>,
    output: OutputCache,
}

impl TableWrapper {
    fn new(table: Table) -> Arc<Self> {
        Arc::new(Self {
            table: Arc::new(table),
            output: OutputCache::new(),
        })
    }
}

impl Operator for TableWrapper {
    fn execute(&self) -> Result<Arc<Table>, StorageError> {
        self.output.get_or_execute(|| Ok(self.table.clone()))
    }

    fn get_output(&self) -> Option<Arc<Table>> {
        self.output.get()
    }
}

fn positions(table: &Table) -> Vec<RowId> {
    match table.chunk(ChunkId(0)).segment(ColumnId(0)) {
        Segment::Reference(reference) => reference.pos_list().as_ref().clone(),
        _ => panic!("scan output must consist of reference segments"),
    }
}

fn row(chunk_id: u32, offset: u32) -> RowId {
    RowId::new(ChunkId(chunk_id), ChunkOffset(offset))
}

/// Every cell of `column` paired with its address, resolved through the
/// untyped surface.
fn materialize(table: &Table, column: ColumnId) -> Vec<(RowId, Value)> {
    let mut cells = Vec::new();
    for chunk_index in 0..table.chunk_count() {
        let chunk_id = ChunkId(chunk_index as u32);
        let segment = table.chunk(chunk_id).segment(column);
        for offset in 0..segment.len() {
            cells.push((
                row(chunk_id.0, offset as u32),
                segment.value_at(offset),
            ));
        }
    }
    cells
}

#[test]
fn table_fills_chunks_up_to_target_size() {
    let mut table = Table::new(2);
    table.add_column("col_1", "int").unwrap();
    table.add_column("col_2", "string").unwrap();
    table
        .append(&[Value::from(4), Value::from("Hello,")])
        .unwrap();
    table
        .append(&[Value::from(6), Value::from("world")])
        .unwrap();
    table.append(&[Value::from(3), Value::from("!")]).unwrap();

    assert_eq!(table.chunk_count(), 2);
    assert_eq!(table.chunk(ChunkId(0)).size(), 2);
    assert_eq!(table.chunk(ChunkId(1)).size(), 1);
    assert_eq!(table.row_count(), 3);
}

#[test]
fn chained_scans_keep_referencing_the_base_table() {
    let mut table = Table::new(10);
    table.add_column("n", "int").unwrap();
    for i in 0..10 {
        table.append(&[Value::from(i)]).unwrap();
    }
    StorageManager::get()
        .add_table("pipeline_chained_scans", Arc::new(table))
        .unwrap();

    let source: Arc<dyn Operator> = Arc::new(GetTable::new("pipeline_chained_scans"));
    let first = Arc::new(TableScan::new(
        source,
        ColumnId(0),
        ScanType::GreaterThanEquals,
        Value::from(5),
    ));
    assert_eq!(
        positions(&first.execute().unwrap()),
        (5..10).map(|o| row(0, o)).collect::<Vec<_>>()
    );

    let second = TableScan::new(
        first.clone(),
        ColumnId(0),
        ScanType::LessThan,
        Value::from(7),
    );
    let output = second.execute().unwrap();
    assert_eq!(positions(&output), vec![row(0, 5), row(0, 6)]);

    // Row ids address the registered base table, not the intermediate
    // reference table.
    match output.chunk(ChunkId(0)).segment(ColumnId(0)) {
        Segment::Reference(reference) => {
            assert_eq!(reference.referenced_table().row_count(), 10);
            assert_eq!(reference.value_at(1), Value::from(6));
        }
        _ => panic!("expected reference segment"),
    }

    StorageManager::get()
        .drop_table("pipeline_chained_scans")
        .unwrap();
}

#[test]
fn scan_results_agree_across_representations() {
    // Same rows, three physical layouts: raw value segments, all chunks
    // compressed, and a mix of both.
    let cells: Vec<i64> = vec![13, 2, 8, 2, 40, 21, 8, 0, 33, 8, 2, 40, 7];
    let build = |compress: &[usize]| {
        let mut table = Table::new(4);
        table.add_column("n", "long").unwrap();
        for &v in &cells {
            table.append(&[Value::from(v)]).unwrap();
        }
        for &chunk in compress {
            table.compress_chunk(ChunkId(chunk as u32)).unwrap();
        }
        table
    };
    let plain = TableWrapper::new(build(&[]));
    let compressed = TableWrapper::new(build(&[0, 1, 2, 3]));
    let mixed = TableWrapper::new(build(&[1, 3]));

    let reference_cells = materialize(&plain.execute().unwrap(), ColumnId(0));

    let predicates = [
        ScanType::Equals,
        ScanType::NotEquals,
        ScanType::LessThan,
        ScanType::LessThanEquals,
        ScanType::GreaterThan,
        ScanType::GreaterThanEquals,
    ];
    for scan_type in predicates {
        for probe in [-1i64, 0, 2, 8, 9, 21, 40, 99] {
            let expected: Vec<RowId> = reference_cells
                .iter()
                .filter(|(_, cell)| {
                    scan_type.compare(&cell.cast::<i64>().unwrap(), &probe)
                })
                .map(|(row_id, _)| *row_id)
                .collect();

            for input in [&plain, &compressed, &mixed] {
                let scan = TableScan::new(
                    input.clone(),
                    ColumnId(0),
                    scan_type,
                    Value::from(probe),
                );
                assert_eq!(
                    positions(&scan.execute().unwrap()),
                    expected,
                    "diverged on {} {}",
                    scan_type,
                    probe
                );
            }
        }
    }
}

#[test]
fn scan_over_scan_handles_dictionary_base() {
    let mut table = Table::new(3);
    table.add_column("word", "string").unwrap();
    table.add_column("n", "int").unwrap();
    for (word, n) in [
        ("Bill", 1),
        ("Steve", 2),
        ("Alexander", 3),
        ("Steve", 4),
        ("Hasso", 5),
        ("Bill", 6),
    ] {
        table.append(&[Value::from(word), Value::from(n)]).unwrap();
    }
    table.compress_chunk(ChunkId(0)).unwrap();
    table.compress_chunk(ChunkId(1)).unwrap();

    let source = TableWrapper::new(table);
    let names = Arc::new(TableScan::new(
        source,
        ColumnId(0),
        ScanType::NotEquals,
        Value::from("Steve"),
    ));
    let filtered = TableScan::new(names, ColumnId(1), ScanType::GreaterThan, Value::from(2));
    let output = filtered.execute().unwrap();

    assert_eq!(positions(&output), vec![row(0, 2), row(1, 1), row(1, 2)]);
    let chunk = output.chunk(ChunkId(0));
    assert_eq!(chunk.segment(ColumnId(0)).value_at(0), Value::from("Alexander"));
    assert_eq!(chunk.segment(ColumnId(1)).value_at(2), Value::from(6));
}

#[test]
fn search_value_type_mismatch_fails_before_any_output() {
    let mut table = Table::new(4);
    table.add_column("n", "int").unwrap();
    table.append(&[Value::from(1)]).unwrap();

    let scan = TableScan::new(
        TableWrapper::new(table),
        ColumnId(0),
        ScanType::Equals,
        Value::from(1.0f64),
    );
    assert!(matches!(
        scan.execute().unwrap_err(),
        StorageError::TypeMismatch { .. }
    ));
    assert!(scan.get_output().is_none());
}

#[test]
fn registry_print_reflects_scanned_tables() {
    let mut table = Table::new(2);
    table.add_column("n", "int").unwrap();
    for i in 0..3 {
        table.append(&[Value::from(i)]).unwrap();
    }
    StorageManager::get()
        .add_table("pipeline_print_probe", Arc::new(table))
        .unwrap();

    let mut out = Vec::new();
    StorageManager::get().print(&mut out).unwrap();
    let rendered = String::from_utf8(out).unwrap();
    assert!(
        rendered.contains("pipeline_print_probe #columns: 1 #rows: 3 #chunks: 2"),
        "unexpected print output: {rendered}"
    );

    StorageManager::get()
        .drop_table("pipeline_print_probe")
        .unwrap();
}
