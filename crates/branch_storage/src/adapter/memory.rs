//! In-memory adapter.

use super::{Entries, KeyPrefix, StorageAdapter};
use crate::error::StorageResult;
use crate::host::MemoryTable;
use crate::kind::BackendKind;

/// Adapter over a [`MemoryTable`].
///
/// Nothing survives a reload. The table is private unless the caller hands
/// the same [`MemoryTable`] to several instances, in which case they share
/// data and only the key prefix separates them.
#[derive(Debug, Clone)]
pub struct InMemoryAdapter {
    table: MemoryTable,
    prefix: KeyPrefix,
}

impl InMemoryAdapter {
    /// Creates an adapter over `table`.
    pub fn new(table: MemoryTable, prefix: KeyPrefix) -> Self {
        Self { table, prefix }
    }

    /// Returns the backing table.
    pub fn table(&self) -> &MemoryTable {
        &self.table
    }
}

impl StorageAdapter for InMemoryAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::InMemory
    }

    fn get(&self, key: &str) -> Option<String> {
        self.table.get(&self.prefix.apply(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.table.insert(self.prefix.apply(key), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.table.remove(&self.prefix.apply(key));
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.table.retain(|key| !self.prefix.owns(key));
        Ok(())
    }

    fn get_all(&self) -> Entries {
        self.table
            .snapshot()
            .into_iter()
            .filter_map(|(key, value)| Some((self.prefix.strip(&key)?.to_string(), value)))
            .collect()
    }

    fn probe(&self, _marker: &str) -> StorageResult<()> {
        Ok(())
    }
}
