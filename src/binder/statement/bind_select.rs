use log::debug;

use super::SelectStatementBinder;
use crate::binder::{
    BindError, CombineSegmentBinder, LockSegmentBinder, ProjectionsSegmentBinder,
    StatementBinderContext, TableBinderContexts, TableSegmentBinder, WhereSegmentBinder,
    LOGGING_TARGET,
};
use crate::statement::{DialectSelectStatement, SelectStatement};
use crate::util::tree_render::TreeRender;

impl SelectStatementBinder {
    /// Clause order matters: CTEs must be visible before FROM, and FROM defines
    /// the own scope that projections, WHERE and LOCK resolve against.
    pub(super) fn bind_select(
        statement: &SelectStatement,
        context: &mut StatementBinderContext,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<SelectStatement, BindError> {
        let base = statement.base();
        let mut result = statement.new_like();

        if let Some(with) = statement.with_segment() {
            Self::bind_with(with, context)?;
            result.set_with_segment(with.clone())?;
        }
        let context = &*context;

        let (from, table_binder_contexts) = match &base.from {
            Some(from) => {
                let (from, table_binder_contexts) =
                    TableSegmentBinder::bind(from, context, outer_table_binder_contexts)?;
                (Some(from), table_binder_contexts)
            }
            None => (None, TableBinderContexts::default()),
        };

        let projections = ProjectionsSegmentBinder::bind(
            &base.projections,
            context,
            from.as_ref(),
            &table_binder_contexts,
            outer_table_binder_contexts,
        )?;
        let where_clause = base
            .where_clause
            .as_ref()
            .map(|segment| {
                WhereSegmentBinder::bind(
                    segment,
                    context,
                    &table_binder_contexts,
                    outer_table_binder_contexts,
                )
            })
            .transpose()?;
        let combine = base
            .combine
            .as_ref()
            .map(|segment| CombineSegmentBinder::bind(segment, context))
            .transpose()?;

        {
            let result_base = result.base_mut();
            result_base.from = from;
            result_base.projections = projections;
            result_base.where_clause = where_clause;
            result_base.group_by = base.group_by.clone();
            result_base.having = base.having.clone();
            result_base.order_by = base.order_by.clone();
            result_base.combine = combine;
        }

        if let Some(limit) = statement.limit_segment() {
            result.set_limit_segment(limit.clone())?;
        }
        if let Some(lock) = statement.lock_segment() {
            result.set_lock_segment(LockSegmentBinder::bind(
                lock,
                context,
                &table_binder_contexts,
                outer_table_binder_contexts,
            )?)?;
        }
        if let Some(window) = statement.window_segment() {
            result.set_window_segment(window.clone())?;
        }
        if let Some(model) = statement.model_segment() {
            result.set_model_segment(model.clone())?;
        }

        let result_base = result.base_mut();
        result_base.parameter_marker_segments = base.parameter_marker_segments.clone();
        result_base.comment_segments = base.comment_segments.clone();
        result_base.variable_names = base.variable_names.clone();

        debug!(
            target: LOGGING_TARGET,
            "bound statement:\n{}",
            TreeRender::select_statement_tree(&result)
        );
        Ok(result)
    }
}
