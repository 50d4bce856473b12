use std::sync::Arc;

use arrow::datatypes::DataType;

use crate::catalog::{Catalog, CatalogRef, ColumnCatalog, TableCatalog};
use crate::parser::parse;
use crate::statement::SelectStatement;
use crate::types::DatabaseType;

pub(crate) static DEFAULT_DATABASE: &str = "foo_db";

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tables() -> Vec<TableCatalog> {
    vec![
        TableCatalog::new(
            "t_order",
            vec![
                ColumnCatalog::new("order_id", DataType::Int64, false),
                ColumnCatalog::new("user_id", DataType::Int32, false),
                ColumnCatalog::new("status", DataType::Utf8, true),
            ],
        ),
        TableCatalog::new(
            "t_order_item",
            vec![
                ColumnCatalog::new("item_id", DataType::Int64, false),
                ColumnCatalog::new("order_id", DataType::Int64, false),
                ColumnCatalog::new("user_id", DataType::Int32, false),
                ColumnCatalog::new("status", DataType::Utf8, true),
            ],
        ),
        TableCatalog::new(
            "t_user",
            vec![
                ColumnCatalog::new("user_id", DataType::Int32, false),
                ColumnCatalog::new("user_name", DataType::Utf8, true),
            ],
        ),
    ]
}

/// `foo_db` with the same tables under the MySQL schema (`foo_db`) and the
/// PostgreSQL one (`public`).
pub(crate) fn build_catalog() -> CatalogRef {
    let mut catalog = Catalog::new();
    catalog.add_database(DEFAULT_DATABASE).unwrap();
    for schema in [DEFAULT_DATABASE, "public"] {
        for table in tables() {
            catalog.add_table(DEFAULT_DATABASE, schema, table).unwrap();
        }
    }
    Arc::new(catalog)
}

pub(crate) fn parse_one(sql: &str, database_type: DatabaseType) -> SelectStatement {
    let mut statements = parse(sql, database_type).unwrap();
    assert_eq!(statements.len(), 1, "expected one statement in {}", sql);
    statements.remove(0)
}
