use log::debug;

use super::SelectStatementBinder;
use crate::binder::{
    BindError, CaseInsensitiveIdentifier, StatementBinderContext, TableBinderContexts,
    TableSegmentBinderContext, LOGGING_TARGET,
};
use crate::statement::segment::WithSegment;
use crate::statement::DialectSelectStatement;

impl SelectStatementBinder {
    /// Make the CTEs of `segment` visible as external relations of `context`.
    ///
    /// Each body sees the external relations inherited from enclosing statements
    /// plus the CTEs declared before it, never its own or later names. A name
    /// declared twice resolves to the last definition.
    pub(super) fn bind_with(
        segment: &WithSegment,
        context: &mut StatementBinderContext,
    ) -> Result<(), BindError> {
        let mut working_contexts = context.external_table_binder_contexts().clone();
        let empty = TableBinderContexts::default();
        for cte in &segment.common_table_expressions {
            let select =
                Self::bind_nested(&cte.subquery.select, context, &empty, &working_contexts)?;
            let table_context =
                TableSegmentBinderContext::new(select.base().projections.projections.clone())
                    .with_column_aliases(&cte.identifier, &cte.column_aliases)?;
            debug!(
                target: LOGGING_TARGET,
                "bind cte {} with {} columns",
                cte.identifier,
                table_context.projections().len()
            );
            working_contexts.insert(
                CaseInsensitiveIdentifier::from(&cte.identifier),
                table_context,
            );
        }
        *context.external_table_binder_contexts_mut() = working_contexts;
        Ok(())
    }
}
