use strum_macros::Display;

use super::TableBinderContexts;
use crate::catalog::CatalogRef;
use crate::types::DatabaseType;
use crate::util::eq_ignore_case;

/// The clause a reference occurs in, reported with binding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SegmentType {
    #[strum(serialize = "PROJECTION")]
    Projection,
    #[strum(serialize = "FROM")]
    From,
    #[strum(serialize = "JOIN ON")]
    JoinOn,
    #[strum(serialize = "JOIN USING")]
    JoinUsing,
    #[strum(serialize = "PREDICATE")]
    Predicate,
    #[strum(serialize = "LOCK")]
    Lock,
}

/// The StatementBinderContext carries everything a bind call shares across clauses
/// of one statement. It is created per statement and never shared between calls.
#[derive(Debug, Clone)]
pub struct StatementBinderContext {
    catalog: CatalogRef,
    default_database_name: String,
    database_type: DatabaseType,
    variable_names: Vec<String>,
    /// CTEs and externally supplied relations visible to this statement
    external_table_binder_contexts: TableBinderContexts,
    /// How many statements enclose this one
    depth: usize,
}

impl StatementBinderContext {
    pub fn new(
        catalog: CatalogRef,
        default_database_name: impl Into<String>,
        database_type: DatabaseType,
        variable_names: Vec<String>,
    ) -> Self {
        Self {
            catalog,
            default_database_name: default_database_name.into(),
            database_type,
            variable_names,
            external_table_binder_contexts: TableBinderContexts::default(),
            depth: 0,
        }
    }

    pub(crate) fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn catalog(&self) -> &CatalogRef {
        &self.catalog
    }

    pub fn default_database_name(&self) -> &str {
        &self.default_database_name
    }

    pub fn database_type(&self) -> DatabaseType {
        self.database_type
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_variable(&self, name: &str) -> bool {
        self.variable_names
            .iter()
            .any(|v| eq_ignore_case(v, name))
    }

    pub fn external_table_binder_contexts(&self) -> &TableBinderContexts {
        &self.external_table_binder_contexts
    }

    pub fn external_table_binder_contexts_mut(&mut self) -> &mut TableBinderContexts {
        &mut self.external_table_binder_contexts
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_new_context_is_empty() {
        let context = StatementBinderContext::new(
            Arc::new(Catalog::new()),
            "foo_db",
            DatabaseType::MySql,
            vec!["@Total".to_string()],
        );
        assert!(context.external_table_binder_contexts().is_empty());
        assert_eq!(context.depth(), 0);
        assert_eq!(context.default_database_name(), "foo_db");
        assert!(context.is_variable("@total"));
        assert!(!context.is_variable("total"));
    }
}
