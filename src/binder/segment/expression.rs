use super::ColumnSegmentBinder;
use crate::binder::{
    BindError, SegmentType, SelectStatementBinder, StatementBinderContext, TableBinderContexts,
};
use crate::statement::segment::{ExpressionSegment, FunctionSegment, SubquerySegment};

/// Binds every column reference and nested subquery inside an expression tree.
pub struct ExpressionSegmentBinder;

impl ExpressionSegmentBinder {
    pub fn bind(
        segment: &ExpressionSegment,
        segment_type: SegmentType,
        context: &StatementBinderContext,
        table_binder_contexts: &TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<ExpressionSegment, BindError> {
        let bind = |expr: &ExpressionSegment| {
            Self::bind(
                expr,
                segment_type,
                context,
                table_binder_contexts,
                outer_table_binder_contexts,
            )
        };
        let bind_boxed = |expr: &ExpressionSegment| bind(expr).map(Box::new);

        let result = match segment {
            ExpressionSegment::Column(column) => {
                ExpressionSegment::Column(ColumnSegmentBinder::bind(
                    column,
                    segment_type,
                    context,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )?)
            }
            ExpressionSegment::Literal(_)
            | ExpressionSegment::ParameterMarker(_)
            | ExpressionSegment::Wildcard(_) => segment.clone(),
            ExpressionSegment::Binary {
                left,
                operator,
                right,
            } => ExpressionSegment::Binary {
                left: bind_boxed(left)?,
                operator: operator.clone(),
                right: bind_boxed(right)?,
            },
            ExpressionSegment::Unary { operator, expr } => ExpressionSegment::Unary {
                operator: operator.clone(),
                expr: bind_boxed(expr)?,
            },
            ExpressionSegment::Between {
                left,
                low,
                high,
                not,
            } => ExpressionSegment::Between {
                left: bind_boxed(left)?,
                low: bind_boxed(low)?,
                high: bind_boxed(high)?,
                not: *not,
            },
            ExpressionSegment::In { left, right, not } => ExpressionSegment::In {
                left: bind_boxed(left)?,
                right: bind_boxed(right)?,
                not: *not,
            },
            ExpressionSegment::List(items) => ExpressionSegment::List(
                items.iter().map(bind).collect::<Result<Vec<_>, _>>()?,
            ),
            ExpressionSegment::IsNull { expr, not } => ExpressionSegment::IsNull {
                expr: bind_boxed(expr)?,
                not: *not,
            },
            ExpressionSegment::Function(function) => ExpressionSegment::Function(FunctionSegment {
                name: function.name.clone(),
                distinct: function.distinct,
                parameters: function
                    .parameters
                    .iter()
                    .map(bind)
                    .collect::<Result<Vec<_>, _>>()?,
                text: function.text.clone(),
            }),
            ExpressionSegment::Case {
                operand,
                when_then,
                else_expr,
            } => ExpressionSegment::Case {
                operand: operand.as_deref().map(bind_boxed).transpose()?,
                when_then: when_then
                    .iter()
                    .map(|(when, then)| -> Result<_, BindError> {
                        Ok((bind(when)?, bind(then)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                else_expr: else_expr.as_deref().map(bind_boxed).transpose()?,
            },
            ExpressionSegment::Subquery(subquery) => {
                ExpressionSegment::Subquery(SubquerySegmentBinder::bind(
                    subquery,
                    context,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )?)
            }
            ExpressionSegment::Exists { subquery, not } => ExpressionSegment::Exists {
                subquery: SubquerySegmentBinder::bind(
                    subquery,
                    context,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )?,
                not: *not,
            },
        };
        Ok(result)
    }
}

/// Binds a subquery nested in an expression. The subquery sees the enclosing
/// statement's own relations, layered over whatever that statement could see
/// from further out, as its outer scope.
pub struct SubquerySegmentBinder;

impl SubquerySegmentBinder {
    pub fn bind(
        segment: &SubquerySegment,
        context: &StatementBinderContext,
        table_binder_contexts: &TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<SubquerySegment, BindError> {
        let mut subquery_outer_contexts = outer_table_binder_contexts.clone();
        for (relation, table_context) in table_binder_contexts {
            subquery_outer_contexts.insert(relation.clone(), table_context.clone());
        }
        let select = SelectStatementBinder::bind_nested(
            &segment.select,
            context,
            &subquery_outer_contexts,
            context.external_table_binder_contexts(),
        )?;
        Ok(SubquerySegment::new(select, segment.text.clone()))
    }
}
