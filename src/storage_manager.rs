//! # **StorageManager Module** - *Process-Wide Table Registry*
//!
//! Maps table names to shared table handles for the whole process.
//! Operators resolve their base tables here; hosts register and drop
//! tables around query execution.
//!
//! The registry is a process-level resource with explicit access points:
//! [`StorageManager::get`] hands out the singleton, [`reset`] clears it.
//! Access is serialized through an internal mutex; concurrent add/drop
//! coordination beyond that is the host's concern.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tracing::debug;

use crate::{StorageError, Table};

static STORAGE_MANAGER: OnceLock<StorageManager> = OnceLock::new();

/// # StorageManager
///
/// Name → table registry. Names are unique; tables are handed out as
/// shared handles so operator graphs keep them alive past a drop.
#[derive(Debug, Default)]
pub struct StorageManager {
    tables: Mutex<BTreeMap<String, Arc<Table>>>,
}

impl StorageManager {
    /// The process-wide registry.
    pub fn get() -> &'static StorageManager {
        STORAGE_MANAGER.get_or_init(StorageManager::new)
    }

    /// A fresh, empty registry. Hosts embedding several isolated
    /// catalogs can hold their own instances; [`get`](Self::get) serves
    /// the shared one.
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(BTreeMap::new()),
        }
    }

    fn tables(&self) -> MutexGuard<'_, BTreeMap<String, Arc<Table>>> {
        // A poisoned lock only means a panic elsewhere mid-access; the
        // map itself is always in a consistent state.
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Registers a table, failing when the name is taken.
    pub fn add_table(
        &self,
        name: impl Into<String>,
        table: Arc<Table>,
    ) -> Result<(), StorageError> {
        let name = name.into();
        let mut tables = self.tables();
        if tables.contains_key(&name) {
            return Err(StorageError::TableAlreadyExists(name));
        }
        debug!(table = %name, rows = table.row_count(), "registering table");
        tables.insert(name, table);
        Ok(())
    }

    /// Unregisters a table, failing when the name is unknown.
    pub fn drop_table(&self, name: &str) -> Result<(), StorageError> {
        match self.tables().remove(name) {
            Some(_) => {
                debug!(table = %name, "dropped table");
                Ok(())
            }
            None => Err(StorageError::TableNotFound(name.to_string())),
        }
    }

    /// The table registered under `name`.
    pub fn get_table(&self, name: &str) -> Result<Arc<Table>, StorageError> {
        self.tables()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::TableNotFound(name.to_string()))
    }

    /// Whether `name` is registered.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables().contains_key(name)
    }

    /// All registered names, ordered.
    pub fn table_names(&self) -> Vec<String> {
        self.tables().keys().cloned().collect()
    }

    /// Drops every registered table.
    pub fn reset(&self) {
        self.tables().clear();
    }

    /// Writes a one-line-per-table summary of the registry.
    pub fn print(&self, out: &mut dyn Write) -> io::Result<()> {
        let tables = self.tables();
        writeln!(out, "StorageManager #tables: {}", tables.len())?;
        for (name, table) in tables.iter() {
            writeln!(
                out,
                "{} #columns: {} #rows: {} #chunks: {}",
                name,
                table.column_count(),
                table.row_count(),
                table.chunk_count()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn sample_table() -> Arc<Table> {
        let mut table = Table::new(2);
        table.add_column("n", "int").unwrap();
        for i in 0..3 {
            table.append(&[Value::from(i)]).unwrap();
        }
        Arc::new(table)
    }

    #[test]
    fn add_get_drop_round_trip() {
        let manager = StorageManager::new();
        assert!(!manager.has_table("first"));
        manager.add_table("first", sample_table()).unwrap();
        assert!(manager.has_table("first"));
        assert_eq!(manager.get_table("first").unwrap().row_count(), 3);

        manager.drop_table("first").unwrap();
        assert!(!manager.has_table("first"));
        assert!(matches!(
            manager.get_table("first").unwrap_err(),
            StorageError::TableNotFound(_)
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let manager = StorageManager::new();
        manager.add_table("dup", sample_table()).unwrap();
        assert_eq!(
            manager.add_table("dup", sample_table()).unwrap_err(),
            StorageError::TableAlreadyExists("dup".to_string())
        );
    }

    #[test]
    fn dropping_missing_table_fails() {
        let manager = StorageManager::new();
        assert!(matches!(
            manager.drop_table("ghost").unwrap_err(),
            StorageError::TableNotFound(_)
        ));
    }

    #[test]
    fn table_names_are_ordered() {
        let manager = StorageManager::new();
        manager.add_table("zeta", sample_table()).unwrap();
        manager.add_table("alpha", sample_table()).unwrap();
        assert_eq!(manager.table_names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn reset_clears_everything() {
        let manager = StorageManager::new();
        manager.add_table("a", sample_table()).unwrap();
        manager.add_table("b", sample_table()).unwrap();
        manager.reset();
        assert!(manager.table_names().is_empty());
    }

    #[test]
    fn print_summarises_the_registry() {
        let manager = StorageManager::new();
        manager.add_table("people", sample_table()).unwrap();
        let mut out = Vec::new();
        manager.print(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "StorageManager #tables: 1\npeople #columns: 1 #rows: 3 #chunks: 2\n"
        );
    }

    #[test]
    fn process_wide_instance_is_shared() {
        let name = "storage_manager_singleton_probe";
        StorageManager::get().add_table(name, sample_table()).unwrap();
        assert!(StorageManager::get().has_table(name));
        StorageManager::get().drop_table(name).unwrap();
    }
}
