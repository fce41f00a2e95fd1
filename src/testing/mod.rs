use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::query::{ColumnInfo, ColumnSet, SchemaProvider, TableQueryError};

enum MemoryTable {
    /// `(name, udt_name)` pairs
    Columns(Vec<(&'static str, &'static str)>),
    Broken(&'static str),
}

/// In-memory schema provider for exercising the resolver without a database
#[derive(Default)]
pub struct MemorySchemaProvider {
    tables: BTreeMap<&'static str, MemoryTable>,
    column_lookups: AtomicUsize,
}

impl MemorySchemaProvider {
    /// A table whose columns are all `text`
    pub fn with_table(self, name: &'static str, columns: &[&'static str]) -> Self {
        let typed: Vec<_> = columns.iter().map(|c| (*c, "text")).collect();
        self.with_typed_table(name, &typed)
    }

    pub fn with_typed_table(mut self, name: &'static str, columns: &[(&'static str, &'static str)]) -> Self {
        self.tables.insert(name, MemoryTable::Columns(columns.to_vec()));
        self
    }

    /// A table that lists fine but fails reflection with `reason`
    pub fn with_broken_table(mut self, name: &'static str, reason: &'static str) -> Self {
        self.tables.insert(name, MemoryTable::Broken(reason));
        self
    }

    /// How many times `columns` has been called
    pub fn column_lookups(&self) -> usize {
        self.column_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaProvider for MemorySchemaProvider {
    async fn table_names(&self) -> Result<Vec<String>, TableQueryError> {
        Ok(self.tables.keys().map(|name| name.to_string()).collect())
    }

    async fn columns(&self, table: &str) -> Result<ColumnSet, TableQueryError> {
        self.column_lookups.fetch_add(1, Ordering::SeqCst);
        match self.tables.get(table) {
            Some(MemoryTable::Columns(columns)) => Ok(columns
                .iter()
                .map(|(name, udt_name)| ColumnInfo::new(*name, *udt_name))
                .collect()),
            Some(MemoryTable::Broken(reason)) => Err(TableQueryError::schema_load(table, reason)),
            None => Err(TableQueryError::schema_load(table, "no columns could be reflected")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_provider_lists_tables_sorted() {
        let provider = MemorySchemaProvider::default()
            .with_table("zeta", &["a"])
            .with_table("alpha", &["b"]);
        assert_eq!(provider.table_names().await.unwrap(), vec!["alpha", "zeta"]);
        assert_eq!(provider.column_lookups(), 0);
    }
}
