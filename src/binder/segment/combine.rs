use crate::binder::{BindError, SelectStatementBinder, StatementBinderContext};
use crate::statement::segment::{CombineSegment, SubquerySegment};

/// Binds both operands of a set operation as independent statements that share
/// the enclosing statement's CTEs.
pub struct CombineSegmentBinder;

impl CombineSegmentBinder {
    pub fn bind(
        segment: &CombineSegment,
        context: &StatementBinderContext,
    ) -> Result<CombineSegment, BindError> {
        Ok(CombineSegment {
            left: Self::bind_operand(&segment.left, context)?,
            combine_type: segment.combine_type,
            right: Self::bind_operand(&segment.right, context)?,
        })
    }

    fn bind_operand(
        segment: &SubquerySegment,
        context: &StatementBinderContext,
    ) -> Result<SubquerySegment, BindError> {
        let select = SelectStatementBinder::bind_nested_with_external_context(
            &segment.select,
            context,
            context.external_table_binder_contexts(),
        )?;
        Ok(SubquerySegment::new(select, segment.text.clone()))
    }
}
