use log::trace;

use super::{
    find_relation, relation_names, ColumnSegmentBinder, ExpressionSegmentBinder,
    SubquerySegmentBinder,
};
use crate::binder::{
    BindError, CaseInsensitiveIdentifier, SegmentType, StatementBinderContext,
    TableBinderContexts, TableSegmentBinderContext, LOGGING_TARGET,
};
use crate::statement::segment::{
    ColumnProjectionSegment, ColumnScope, ColumnSegment, ExpressionProjectionSegment,
    OwnerSegment, ProjectionSegment, ProjectionsSegment, ShorthandProjectionSegment,
    SubqueryProjectionSegment, TableSegment,
};

/// Binds the select list. Shorthand projections are expanded into the columns
/// of the relations they cover.
pub struct ProjectionsSegmentBinder;

impl ProjectionsSegmentBinder {
    pub fn bind(
        segment: &ProjectionsSegment,
        context: &StatementBinderContext,
        bound_from: Option<&TableSegment>,
        table_binder_contexts: &TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<ProjectionsSegment, BindError> {
        let projections = segment
            .projections
            .iter()
            .map(|projection| {
                Self::bind_projection(
                    projection,
                    context,
                    bound_from,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ProjectionsSegment {
            distinct: segment.distinct,
            projections,
        })
    }

    fn bind_projection(
        projection: &ProjectionSegment,
        context: &StatementBinderContext,
        bound_from: Option<&TableSegment>,
        table_binder_contexts: &TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<ProjectionSegment, BindError> {
        match projection {
            ProjectionSegment::Column(p) => Ok(ProjectionSegment::Column(ColumnProjectionSegment {
                column: ColumnSegmentBinder::bind(
                    &p.column,
                    SegmentType::Projection,
                    context,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )?,
                alias: p.alias.clone(),
            })),
            ProjectionSegment::Expression(p) => {
                Ok(ProjectionSegment::Expression(ExpressionProjectionSegment {
                    expr: ExpressionSegmentBinder::bind(
                        &p.expr,
                        SegmentType::Projection,
                        context,
                        table_binder_contexts,
                        outer_table_binder_contexts,
                    )?,
                    text: p.text.clone(),
                    alias: p.alias.clone(),
                }))
            }
            ProjectionSegment::Subquery(p) => {
                Ok(ProjectionSegment::Subquery(SubqueryProjectionSegment {
                    subquery: SubquerySegmentBinder::bind(
                        &p.subquery,
                        context,
                        table_binder_contexts,
                        outer_table_binder_contexts,
                    )?,
                    alias: p.alias.clone(),
                }))
            }
            ProjectionSegment::Shorthand(p) => Ok(ProjectionSegment::Shorthand(
                Self::bind_shorthand(
                    p,
                    context,
                    bound_from,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )?,
            )),
        }
    }

    fn bind_shorthand(
        segment: &ShorthandProjectionSegment,
        context: &StatementBinderContext,
        bound_from: Option<&TableSegment>,
        table_binder_contexts: &TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<ShorthandProjectionSegment, BindError> {
        let mut actual_projections = vec![];
        match &segment.owner {
            Some(owner) => {
                let (relation, table_context, scope) = find_relation(
                    &owner.identifier,
                    context,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )
                .ok_or_else(|| BindError::UnresolvedTable {
                    name: owner.to_string(),
                    segment: SegmentType::Projection,
                })?;
                Self::expand_relation(relation, table_context, scope, &mut actual_projections);
            }
            None => {
                let bound_from =
                    bound_from.ok_or_else(|| BindError::ShorthandWithoutFrom("*".to_string()))?;
                for name in relation_names(bound_from) {
                    let key = CaseInsensitiveIdentifier::from(&name);
                    if let Some((relation, table_context)) =
                        table_binder_contexts.get_key_value(&key)
                    {
                        Self::expand_relation(
                            relation,
                            table_context,
                            ColumnScope::Own,
                            &mut actual_projections,
                        );
                    }
                }
            }
        }
        trace!(
            target: LOGGING_TARGET,
            "expand shorthand to {} projections",
            actual_projections.len()
        );
        Ok(ShorthandProjectionSegment {
            owner: segment.owner.clone(),
            actual_projections,
        })
    }

    /// Every column of the relation, in the relation's own order, owned by the
    /// relation name as written in FROM.
    fn expand_relation(
        relation: &CaseInsensitiveIdentifier,
        table_context: &TableSegmentBinderContext,
        scope: ColumnScope,
        result: &mut Vec<ProjectionSegment>,
    ) {
        for projection in table_context.projections() {
            let Some(label) = projection.column_label() else {
                continue;
            };
            let mut column =
                ColumnSegment::with_owner(label, OwnerSegment::new(relation.original().clone()));
            column.bounded_info = Some(ColumnSegmentBinder::create_bounded_info(
                projection, relation, scope,
            ));
            result.push(ProjectionSegment::column(column));
        }
    }
}
