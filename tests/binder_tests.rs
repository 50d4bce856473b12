use std::sync::Arc;

use arrow::datatypes::DataType;
use pretty_assertions::assert_eq;
use sqlbind::binder::{
    BindError, CaseInsensitiveIdentifier, SegmentType, SelectStatementBinder,
    StatementBinderContext, TableBinderContexts, TableSegmentBinder,
};
use sqlbind::catalog::{Catalog, CatalogRef, ColumnCatalog, TableCatalog};
use sqlbind::parse;
use sqlbind::statement::segment::{
    ColumnScope, ColumnSegmentBoundedInfo, ExpressionSegment, Identifier, ProjectionSegment,
};
use sqlbind::statement::{DialectSelectStatement, SelectStatement};
use sqlbind::types::DatabaseType;
use sqlbind::util::tree_render::TreeRender;

const DATABASE: &str = "sharding_db";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn catalog() -> CatalogRef {
    let mut catalog = Catalog::new();
    catalog.add_database(DATABASE).unwrap();
    catalog
        .add_table(
            DATABASE,
            DATABASE,
            TableCatalog::new(
                "t_order",
                vec![
                    ColumnCatalog::new("order_id", DataType::Int64, false),
                    ColumnCatalog::new("user_id", DataType::Int32, false),
                    ColumnCatalog::new("status", DataType::Utf8, true),
                ],
            ),
        )
        .unwrap();
    catalog
        .add_table(
            DATABASE,
            DATABASE,
            TableCatalog::new(
                "t_order_item",
                vec![
                    ColumnCatalog::new("item_id", DataType::Int64, false),
                    ColumnCatalog::new("order_id", DataType::Int64, false),
                    ColumnCatalog::new("user_id", DataType::Int32, false),
                ],
            ),
        )
        .unwrap();
    catalog
        .add_table(
            DATABASE,
            DATABASE,
            TableCatalog::new(
                "t_user",
                vec![
                    ColumnCatalog::new("user_id", DataType::Int32, false),
                    ColumnCatalog::new("user_name", DataType::Utf8, true),
                ],
            ),
        )
        .unwrap();
    Arc::new(catalog)
}

fn parse_one(sql: &str) -> SelectStatement {
    let mut statements = parse(sql, DatabaseType::MySql).unwrap();
    assert_eq!(statements.len(), 1);
    statements.remove(0)
}

/// The relations a FROM clause introduces, as seen by an enclosing statement.
fn relations_of(sql: &str) -> TableBinderContexts {
    let statement = parse_one(sql);
    let context = StatementBinderContext::new(catalog(), DATABASE, DatabaseType::MySql, vec![]);
    let from = statement.base().from.as_ref().unwrap();
    TableSegmentBinder::bind(from, &context, &TableBinderContexts::default())
        .unwrap()
        .1
}

fn first_projection_info(statement: &SelectStatement) -> &ColumnSegmentBoundedInfo {
    match &statement.base().projections.projections[0] {
        ProjectionSegment::Column(p) => p.column.bounded_info.as_ref().unwrap(),
        other => panic!("unexpected projection {:?}", other),
    }
}

#[test]
fn rebinding_a_bound_statement_changes_nothing() {
    init_logger();
    let catalog = catalog();
    let statement = parse_one(
        "WITH recent AS (SELECT order_id, user_id FROM t_order WHERE status = 'PAID') \
         SELECT r.*, u.user_name, (SELECT count(*) FROM t_order_item i WHERE i.order_id = r.order_id) AS items \
         FROM recent r JOIN t_user u ON r.user_id = u.user_id WHERE u.user_id IN (?, ?) LIMIT 10",
    );
    let once = SelectStatementBinder::bind(&statement, &catalog, DATABASE).unwrap();
    let twice = SelectStatementBinder::bind(&once, &catalog, DATABASE).unwrap();
    assert_eq!(
        TreeRender::select_statement_tree(&once),
        TreeRender::select_statement_tree(&twice)
    );
    assert_eq!(once, twice);
}

#[test]
fn binding_leaves_the_input_untouched() {
    init_logger();
    let statement = parse_one(
        "SELECT * FROM t_order o JOIN t_order_item i ON o.order_id = i.order_id WHERE o.status = ?",
    );
    let snapshot = statement.clone();
    let bound = SelectStatementBinder::bind(&statement, &catalog(), DATABASE).unwrap();
    assert_eq!(statement, snapshot);
    assert_ne!(bound, snapshot);
}

#[test]
fn shorthand_expands_in_from_order() {
    init_logger();
    let bound = SelectStatementBinder::bind(
        &parse_one("SELECT * FROM t_user u, t_order o"),
        &catalog(),
        DATABASE,
    )
    .unwrap();
    let rendered = TreeRender::select_statement_tree(&bound);
    assert_eq!(
        rendered,
        r#"MySqlSelectStatement
  Projections:
    Shorthand: *
      Column: u.user_id -> sharding_db.sharding_db.t_user.user_id(own)
      Column: u.user_name -> sharding_db.sharding_db.t_user.user_name(own)
      Column: o.order_id -> sharding_db.sharding_db.t_order.order_id(own)
      Column: o.user_id -> sharding_db.sharding_db.t_order.user_id(own)
      Column: o.status -> sharding_db.sharding_db.t_order.status(own)
  From:
    Join: Comma
      Table: t_user AS u -> sharding_db.sharding_db
      Table: t_order AS o -> sharding_db.sharding_db"#
    );
}

#[test]
fn own_relations_shadow_ctes() {
    init_logger();
    let bound = SelectStatementBinder::bind(
        &parse_one("WITH a AS (SELECT user_name FROM t_user) SELECT a.order_id FROM t_order a"),
        &catalog(),
        DATABASE,
    )
    .unwrap();
    let info = first_projection_info(&bound);
    assert_eq!(info.original_table, Identifier::new("t_order"));
    assert_eq!(info.scope, ColumnScope::Own);
}

#[test]
fn ctes_shadow_outer_relations() {
    init_logger();
    let outer = relations_of("SELECT * FROM t_order a");
    let external = relations_of("SELECT * FROM t_user a");
    let bound = SelectStatementBinder::bind_correlated_subquery(
        &parse_one("SELECT a.user_name FROM t_order_item i"),
        &catalog(),
        DATABASE,
        &outer,
        &external,
    )
    .unwrap();
    let info = first_projection_info(&bound);
    assert_eq!(info.original_table, Identifier::new("t_user"));
    assert_eq!(info.scope, ColumnScope::External);
}

#[test]
fn outer_columns_resolve_only_through_the_correlated_entry_point() {
    init_logger();
    let subquery = parse_one("SELECT i.item_id FROM t_order_item i WHERE i.order_id = o.order_id");
    let catalog = catalog();
    assert_eq!(
        SelectStatementBinder::bind(&subquery, &catalog, DATABASE).unwrap_err(),
        BindError::UnresolvedTable {
            name: "o".to_string(),
            segment: SegmentType::Predicate,
        }
    );

    let outer = relations_of("SELECT * FROM t_order o");
    let bound = SelectStatementBinder::bind_correlated_subquery(
        &subquery,
        &catalog,
        DATABASE,
        &outer,
        &TableBinderContexts::default(),
    )
    .unwrap();
    match &bound.base().where_clause.as_ref().unwrap().expr {
        ExpressionSegment::Binary { right, .. } => match right.as_ref() {
            ExpressionSegment::Column(column) => {
                assert_eq!(column.bounded_info.as_ref().unwrap().scope, ColumnScope::Outer)
            }
            other => panic!("unexpected operand {:?}", other),
        },
        other => panic!("unexpected predicate {:?}", other),
    }
    // the caller's map is only read
    assert_eq!(outer.len(), 1);
    assert!(outer.contains_key(&CaseInsensitiveIdentifier::from("O")));
}

#[test]
fn external_context_supplies_view_shapes() {
    init_logger();
    let view = relations_of("SELECT * FROM t_order v_order");
    let bound = SelectStatementBinder::bind_with_external_context(
        &parse_one("SELECT status FROM v_order"),
        &catalog(),
        DATABASE,
        &view,
    )
    .unwrap();
    let info = first_projection_info(&bound);
    assert_eq!(info.original_table, Identifier::new("t_order"));
    assert_eq!(info.original_column, Identifier::new("status"));
}

#[test]
fn unqualified_column_in_two_relations_is_ambiguous() {
    init_logger();
    assert_eq!(
        SelectStatementBinder::bind(
            &parse_one("SELECT user_id FROM t_order o JOIN t_user u ON o.user_id = u.user_id"),
            &catalog(),
            DATABASE,
        )
        .unwrap_err(),
        BindError::AmbiguousColumn {
            name: "user_id".to_string(),
            segment: SegmentType::Projection,
        }
    );
}

#[test]
fn concurrent_binds_share_one_catalog() {
    init_logger();
    let catalog = catalog();
    let statement = parse_one(
        "SELECT o.order_id, i.item_id FROM t_order o JOIN t_order_item i \
         ON o.order_id = i.order_id WHERE o.user_id = ?",
    );
    let expected = SelectStatementBinder::bind(&statement, &catalog, DATABASE).unwrap();
    std::thread::scope(|scope| {
        let handles = (0..8)
            .map(|_| scope.spawn(|| SelectStatementBinder::bind(&statement, &catalog, DATABASE)))
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}
