mod errors;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arrow::datatypes::DataType;
pub use errors::*;

use crate::util::{eq_ignore_case, fold_case};

/// Catalogs are published as immutable snapshots; binders only ever read them.
pub type CatalogRef = Arc<Catalog>;

/// The Catalog object holds the schema metadata of every logical database.
/// All names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    databases: HashMap<String, DatabaseCatalog>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_database(&mut self, name: &str) -> Result<(), CatalogError> {
        let key = fold_case(name);
        if self.databases.contains_key(&key) {
            return Err(CatalogError::CatalogEntryExists(name.to_string()));
        }
        self.databases.insert(key, DatabaseCatalog::new(name));
        Ok(())
    }

    /// Add a table, creating the schema on demand. The database must exist.
    pub fn add_table(
        &mut self,
        database: &str,
        schema: &str,
        table: TableCatalog,
    ) -> Result<(), CatalogError> {
        let database_catalog = self
            .databases
            .get_mut(&fold_case(database))
            .ok_or_else(|| CatalogError::CatalogEntryNotExists(database.to_string()))?;
        let schema_catalog = database_catalog
            .schemas
            .entry(fold_case(schema))
            .or_insert_with(|| SchemaCatalog::new(schema));
        let key = fold_case(&table.name);
        if schema_catalog.tables.contains_key(&key) {
            return Err(CatalogError::CatalogEntryExists(format!(
                "{}.{}.{}",
                database, schema, table.name
            )));
        }
        schema_catalog.tables.insert(key, table);
        Ok(())
    }

    pub fn contains_database(&self, name: &str) -> bool {
        self.databases.contains_key(&fold_case(name))
    }

    pub fn get_database(&self, name: &str) -> Result<&DatabaseCatalog, CatalogError> {
        self.databases
            .get(&fold_case(name))
            .ok_or_else(|| CatalogError::CatalogEntryNotExists(name.to_string()))
    }

    pub fn get_table(
        &self,
        database: &str,
        schema: &str,
        table: &str,
    ) -> Result<&TableCatalog, CatalogError> {
        self.get_database(database)?
            .schemas
            .get(&fold_case(schema))
            .ok_or_else(|| CatalogError::CatalogEntryNotExists(format!("{}.{}", database, schema)))?
            .tables
            .get(&fold_case(table))
            .ok_or_else(|| {
                CatalogError::CatalogEntryNotExists(format!("{}.{}.{}", database, schema, table))
            })
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseCatalog {
    pub name: String,
    pub schemas: HashMap<String, SchemaCatalog>,
}

impl DatabaseCatalog {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            schemas: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    pub name: String,
    pub tables: HashMap<String, TableCatalog>,
}

impl SchemaCatalog {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tables: HashMap::new(),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct TableCatalog {
    pub name: String,
    /// columns in declaration order
    pub columns: Vec<ColumnCatalog>,
}

impl TableCatalog {
    pub fn new(name: &str, columns: Vec<ColumnCatalog>) -> Self {
        Self {
            name: name.to_string(),
            columns,
        }
    }

    pub fn get_column_by_name(&self, name: &str) -> Option<&ColumnCatalog> {
        self.columns
            .iter()
            .find(|c| eq_ignore_case(&c.desc.name, name))
    }
}

#[derive(Clone, PartialEq)]
pub struct ColumnCatalog {
    pub nullable: bool,
    pub desc: ColumnDesc,
}

impl ColumnCatalog {
    pub fn new(name: &str, data_type: DataType, nullable: bool) -> Self {
        Self {
            nullable,
            desc: ColumnDesc {
                name: name.to_string(),
                data_type,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDesc {
    pub name: String,
    pub data_type: DataType,
}

impl fmt::Debug for ColumnCatalog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{:?}", self.desc.name, self.desc.data_type)
    }
}

impl fmt::Debug for TableCatalog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            r#"{} {{
    columns: {:?}
}}"#,
            self.name, self.columns
        )
    }
}
