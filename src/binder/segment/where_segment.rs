use super::ExpressionSegmentBinder;
use crate::binder::{BindError, SegmentType, StatementBinderContext, TableBinderContexts};
use crate::statement::segment::WhereSegment;

pub struct WhereSegmentBinder;

impl WhereSegmentBinder {
    pub fn bind(
        segment: &WhereSegment,
        context: &StatementBinderContext,
        table_binder_contexts: &TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<WhereSegment, BindError> {
        Ok(WhereSegment {
            expr: ExpressionSegmentBinder::bind(
                &segment.expr,
                SegmentType::Predicate,
                context,
                table_binder_contexts,
                outer_table_binder_contexts,
            )?,
        })
    }
}
