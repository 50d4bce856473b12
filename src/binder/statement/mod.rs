mod bind_select;
mod bind_with;

use log::debug;

use super::{BindError, StatementBinderContext, TableBinderContexts, LOGGING_TARGET};
use crate::catalog::CatalogRef;
use crate::statement::{DialectSelectStatement, SelectStatement};

/// Binds a SELECT statement against a catalog. Every entry point returns a new
/// statement of the same dialect variant; the input is left untouched.
pub struct SelectStatementBinder;

impl SelectStatementBinder {
    /// Bind a top-level statement with no enclosing scope.
    pub fn bind(
        statement: &SelectStatement,
        catalog: &CatalogRef,
        default_database_name: &str,
    ) -> Result<SelectStatement, BindError> {
        let empty = TableBinderContexts::default();
        Self::bind_internal(statement, catalog, default_database_name, &empty, &empty, 0)
    }

    /// Bind a subquery that may reference relations of the enclosing statements
    /// through `outer_table_binder_contexts`.
    pub fn bind_correlated_subquery(
        statement: &SelectStatement,
        catalog: &CatalogRef,
        default_database_name: &str,
        outer_table_binder_contexts: &TableBinderContexts,
        external_table_binder_contexts: &TableBinderContexts,
    ) -> Result<SelectStatement, BindError> {
        Self::bind_internal(
            statement,
            catalog,
            default_database_name,
            outer_table_binder_contexts,
            external_table_binder_contexts,
            0,
        )
    }

    /// Bind a statement that sees externally supplied relations, such as CTEs of
    /// an enclosing statement or view definitions, but no outer columns.
    pub fn bind_with_external_context(
        statement: &SelectStatement,
        catalog: &CatalogRef,
        default_database_name: &str,
        external_table_binder_contexts: &TableBinderContexts,
    ) -> Result<SelectStatement, BindError> {
        Self::bind_internal(
            statement,
            catalog,
            default_database_name,
            &TableBinderContexts::default(),
            external_table_binder_contexts,
            0,
        )
    }

    /// Correlated bind of a statement nested one level below `parent`.
    pub(crate) fn bind_nested(
        statement: &SelectStatement,
        parent: &StatementBinderContext,
        outer_table_binder_contexts: &TableBinderContexts,
        external_table_binder_contexts: &TableBinderContexts,
    ) -> Result<SelectStatement, BindError> {
        Self::bind_internal(
            statement,
            parent.catalog(),
            parent.default_database_name(),
            outer_table_binder_contexts,
            external_table_binder_contexts,
            parent.depth() + 1,
        )
    }

    /// External-context bind of a statement nested one level below `parent`.
    pub(crate) fn bind_nested_with_external_context(
        statement: &SelectStatement,
        parent: &StatementBinderContext,
        external_table_binder_contexts: &TableBinderContexts,
    ) -> Result<SelectStatement, BindError> {
        Self::bind_nested(
            statement,
            parent,
            &TableBinderContexts::default(),
            external_table_binder_contexts,
        )
    }

    fn bind_internal(
        statement: &SelectStatement,
        catalog: &CatalogRef,
        default_database_name: &str,
        outer_table_binder_contexts: &TableBinderContexts,
        external_table_binder_contexts: &TableBinderContexts,
        depth: usize,
    ) -> Result<SelectStatement, BindError> {
        if depth > super::MAX_NESTING_DEPTH {
            return Err(BindError::NestingTooDeep(depth));
        }
        debug!(
            target: LOGGING_TARGET,
            "bind {} statement at depth {}, outer relations: {}, external relations: {}",
            statement.database_type(),
            depth,
            outer_table_binder_contexts.len(),
            external_table_binder_contexts.len(),
        );
        let mut context = StatementBinderContext::new(
            catalog.clone(),
            default_database_name,
            statement.database_type(),
            statement.base().variable_names.clone(),
        )
        .with_depth(depth);
        context.external_table_binder_contexts_mut().extend(
            external_table_binder_contexts
                .iter()
                .map(|(relation, table_context)| (relation.clone(), table_context.clone())),
        );
        Self::bind_select(statement, &mut context, outer_table_binder_contexts)
    }
}
