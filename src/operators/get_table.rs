//! # **GetTable Module** - *Registry Lookup Leaf Operator*
//!
//! The leaf of most operator graphs: resolves a table by name from the
//! process-wide [`StorageManager`] and feeds it downstream.

use std::sync::Arc;

use crate::{Operator, OutputCache, StorageError, StorageManager, Table};

/// # GetTable
///
/// Leaf operator producing a registered table. Registry misses surface
/// unchanged on `execute`.
#[derive(Debug, Default)]
pub struct GetTable {
    table_name: String,
    output: OutputCache,
}

impl GetTable {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            output: OutputCache::new(),
        }
    }

    /// The name this operator resolves.
    #[inline]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl Operator for GetTable {
    fn execute(&self) -> Result<Arc<Table>, StorageError> {
        self.output
            .get_or_execute(|| StorageManager::get().get_table(&self.table_name))
    }

    fn get_output(&self) -> Option<Arc<Table>> {
        self.output.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn resolves_registered_table() {
        let mut table = Table::new(4);
        table.add_column("n", "int").unwrap();
        table.append(&[Value::from(1)]).unwrap();
        StorageManager::get()
            .add_table("get_table_resolves", Arc::new(table))
            .unwrap();

        let operator = GetTable::new("get_table_resolves");
        assert_eq!(operator.table_name(), "get_table_resolves");
        assert!(operator.get_output().is_none());

        let output = operator.execute().unwrap();
        assert_eq!(output.row_count(), 1);
        assert!(Arc::ptr_eq(&output, &operator.execute().unwrap()));
        assert!(operator.get_output().is_some());

        StorageManager::get().drop_table("get_table_resolves").unwrap();
    }

    #[test]
    fn unknown_name_fails() {
        let operator = GetTable::new("get_table_missing");
        assert!(matches!(
            operator.execute().unwrap_err(),
            StorageError::TableNotFound(_)
        ));
        assert!(operator.get_output().is_none());
    }
}
