use itertools::Itertools;
use log::trace;

use crate::binder::{
    BindError, CaseInsensitiveIdentifier, SegmentType, StatementBinderContext,
    TableBinderContexts, TableSegmentBinderContext, LOGGING_TARGET,
};
use crate::statement::segment::{
    ColumnScope, ColumnSegment, ColumnSegmentBoundedInfo, Identifier, ProjectionSegment,
};

/// Resolves column references against the visible relation shapes.
pub struct ColumnSegmentBinder;

impl ColumnSegmentBinder {
    /// Qualified references look their owner up in own, then external, then outer
    /// scope. Unqualified references search the own scope relations, then the outer
    /// ones; a match in more than one relation of the same scope is ambiguous.
    ///
    /// The outer scope is one flat map holding the relations of every enclosing
    /// statement. An unqualified name found in relations of two different enclosing
    /// levels is therefore ambiguous instead of resolving to the nearest level.
    pub fn bind(
        segment: &ColumnSegment,
        segment_type: SegmentType,
        context: &StatementBinderContext,
        table_binder_contexts: &TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<ColumnSegment, BindError> {
        let mut result = segment.clone();
        result.bounded_info = match &segment.owner {
            Some(owner) => {
                let (relation, table_context, scope) = find_relation(
                    &owner.identifier,
                    context,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )
                .ok_or_else(|| BindError::UnresolvedTable {
                    name: owner.to_string(),
                    segment: segment_type,
                })?;
                let projection = Self::find_unique_projection(
                    table_context,
                    segment,
                    segment_type,
                )?
                .ok_or_else(|| BindError::UnresolvedColumn {
                    name: segment.qualified_name(),
                    segment: segment_type,
                })?;
                Some(Self::create_bounded_info(projection, relation, scope))
            }
            None => {
                let own = Self::find_in_scope(segment, segment_type, table_binder_contexts)?;
                let found = match own {
                    Some((relation, projection)) => Some((relation, projection, ColumnScope::Own)),
                    None => {
                        Self::find_in_scope(segment, segment_type, outer_table_binder_contexts)?
                            .map(|(relation, projection)| {
                                (relation, projection, ColumnScope::Outer)
                            })
                    }
                };
                match found {
                    Some((relation, projection, scope)) => {
                        Some(Self::create_bounded_info(projection, relation, scope))
                    }
                    None if context.is_variable(&segment.identifier.value) => None,
                    None => {
                        return Err(BindError::UnresolvedColumn {
                            name: segment.qualified_name(),
                            segment: segment_type,
                        })
                    }
                }
            }
        };
        trace!(
            target: LOGGING_TARGET,
            "bind column {} to {:?}",
            segment,
            result.bounded_info
        );
        Ok(result)
    }

    fn find_in_scope<'a>(
        segment: &ColumnSegment,
        segment_type: SegmentType,
        contexts: &'a TableBinderContexts,
    ) -> Result<Option<(&'a CaseInsensitiveIdentifier, &'a ProjectionSegment)>, BindError> {
        let mut found = None;
        for (relation, table_context) in contexts.iter() {
            if let Some(projection) =
                Self::find_unique_projection(table_context, segment, segment_type)?
            {
                if found.is_some() {
                    return Err(BindError::AmbiguousColumn {
                        name: segment.qualified_name(),
                        segment: segment_type,
                    });
                }
                found = Some((relation, projection));
            }
        }
        Ok(found)
    }

    fn find_unique_projection<'a>(
        table_context: &'a TableSegmentBinderContext,
        segment: &ColumnSegment,
        segment_type: SegmentType,
    ) -> Result<Option<&'a ProjectionSegment>, BindError> {
        match table_context
            .find_projections(&segment.identifier.value)
            .at_most_one()
        {
            Ok(projection) => Ok(projection),
            Err(_) => Err(BindError::AmbiguousColumn {
                name: segment.qualified_name(),
                segment: segment_type,
            }),
        }
    }

    /// Columns coming out of a table or an inner column projection keep pointing
    /// at their physical origin; computed columns point at the relation itself.
    pub(crate) fn create_bounded_info(
        projection: &ProjectionSegment,
        relation: &CaseInsensitiveIdentifier,
        scope: ColumnScope,
    ) -> ColumnSegmentBoundedInfo {
        match projection {
            ProjectionSegment::Column(column_projection) => {
                if let Some(inner) = &column_projection.column.bounded_info {
                    return ColumnSegmentBoundedInfo {
                        scope,
                        ..inner.clone()
                    };
                }
                Self::relation_bounded_info(projection, relation, scope)
            }
            _ => Self::relation_bounded_info(projection, relation, scope),
        }
    }

    fn relation_bounded_info(
        projection: &ProjectionSegment,
        relation: &CaseInsensitiveIdentifier,
        scope: ColumnScope,
    ) -> ColumnSegmentBoundedInfo {
        let column = projection
            .column_label()
            .unwrap_or_else(|| Identifier::new(""));
        ColumnSegmentBoundedInfo::new(None, None, relation.original().clone(), column, scope)
    }
}

/// Look a relation name up in own, external and outer scope, in that order.
pub(crate) fn find_relation<'a>(
    name: &Identifier,
    context: &'a StatementBinderContext,
    table_binder_contexts: &'a TableBinderContexts,
    outer_table_binder_contexts: &'a TableBinderContexts,
) -> Option<(
    &'a CaseInsensitiveIdentifier,
    &'a TableSegmentBinderContext,
    ColumnScope,
)> {
    let key = CaseInsensitiveIdentifier::from(name);
    if let Some((relation, table_context)) = table_binder_contexts.get_key_value(&key) {
        return Some((relation, table_context, ColumnScope::Own));
    }
    if let Some((relation, table_context)) = context
        .external_table_binder_contexts()
        .get_key_value(&key)
    {
        return Some((relation, table_context, ColumnScope::External));
    }
    outer_table_binder_contexts
        .get_key_value(&key)
        .map(|(relation, table_context)| (relation, table_context, ColumnScope::Outer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::test_util::{build_catalog, DEFAULT_DATABASE};
    use crate::statement::segment::OwnerSegment;
    use crate::types::DatabaseType;

    fn relation(
        name: &str,
        columns: &[&str],
    ) -> (CaseInsensitiveIdentifier, TableSegmentBinderContext) {
        let projections = columns.iter().map(|column| {
            let mut segment = ColumnSegment::with_owner(
                Identifier::new(*column),
                OwnerSegment::new(Identifier::new(name)),
            );
            segment.bounded_info = Some(ColumnSegmentBoundedInfo::new(
                Some(Identifier::new(DEFAULT_DATABASE)),
                Some(Identifier::new(DEFAULT_DATABASE)),
                Identifier::new(name),
                Identifier::new(*column),
                ColumnScope::Own,
            ));
            ProjectionSegment::column(segment)
        });
        (
            CaseInsensitiveIdentifier::from(name),
            TableSegmentBinderContext::new(projections),
        )
    }

    fn context() -> StatementBinderContext {
        StatementBinderContext::new(
            build_catalog(),
            DEFAULT_DATABASE,
            DatabaseType::MySql,
            vec!["@max_id".to_string()],
        )
    }

    fn column(owner: Option<&str>, name: &str) -> ColumnSegment {
        match owner {
            Some(owner) => ColumnSegment::with_owner(
                Identifier::new(name),
                OwnerSegment::new(Identifier::new(owner)),
            ),
            None => ColumnSegment::new(Identifier::new(name)),
        }
    }

    fn bind(
        segment: &ColumnSegment,
        context: &StatementBinderContext,
        own: &TableBinderContexts,
        outer: &TableBinderContexts,
    ) -> Result<ColumnSegment, BindError> {
        ColumnSegmentBinder::bind(segment, SegmentType::Predicate, context, own, outer)
    }

    #[test]
    fn test_bind_qualified_column_keeps_original_table() {
        let own: TableBinderContexts = [relation("t_order", &["order_id", "status"])]
            .into_iter()
            .collect();
        let bound = bind(
            &column(Some("T_ORDER"), "Status"),
            &context(),
            &own,
            &TableBinderContexts::default(),
        )
        .unwrap();
        let info = bound.bounded_info.unwrap();
        assert_eq!(info.original_table, Identifier::new("t_order"));
        assert_eq!(info.original_column, Identifier::new("status"));
        assert_eq!(info.scope, ColumnScope::Own);
        assert_eq!(bound.identifier, Identifier::new("Status"));
    }

    #[test]
    fn test_bind_unqualified_column_in_two_relations_is_ambiguous() {
        let own: TableBinderContexts = [
            relation("t_order", &["order_id", "user_id"]),
            relation("t_user", &["user_id"]),
        ]
        .into_iter()
        .collect();
        let err = bind(
            &column(None, "user_id"),
            &context(),
            &own,
            &TableBinderContexts::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BindError::AmbiguousColumn {
                name: "user_id".to_string(),
                segment: SegmentType::Predicate,
            }
        );
    }

    #[test]
    fn test_bind_unqualified_column_prefers_own_scope() {
        let own: TableBinderContexts = [relation("i", &["user_id"])].into_iter().collect();
        let outer: TableBinderContexts = [relation("o", &["user_id", "status"])]
            .into_iter()
            .collect();
        let context = context();

        let bound = bind(&column(None, "user_id"), &context, &own, &outer).unwrap();
        let info = bound.bounded_info.unwrap();
        assert_eq!(info.original_table, Identifier::new("i"));
        assert_eq!(info.scope, ColumnScope::Own);

        let bound = bind(&column(None, "status"), &context, &own, &outer).unwrap();
        let info = bound.bounded_info.unwrap();
        assert_eq!(info.original_table, Identifier::new("o"));
        assert_eq!(info.scope, ColumnScope::Outer);
    }

    #[test]
    fn test_bind_unqualified_column_across_enclosing_levels_is_ambiguous() {
        let own: TableBinderContexts = [relation("i", &["item_id"])].into_iter().collect();
        let outer: TableBinderContexts = [
            relation("o", &["order_id", "user_id"]),
            relation("u", &["user_id", "user_name"]),
        ]
        .into_iter()
        .collect();
        let context = context();
        assert_eq!(
            bind(&column(None, "user_id"), &context, &own, &outer).unwrap_err(),
            BindError::AmbiguousColumn {
                name: "user_id".to_string(),
                segment: SegmentType::Predicate,
            }
        );
        let bound = bind(&column(None, "user_name"), &context, &own, &outer).unwrap();
        assert_eq!(bound.bounded_info.unwrap().scope, ColumnScope::Outer);
    }

    #[test]
    fn test_bind_qualified_column_from_external_relation() {
        let mut context = context();
        let (name, shape) = relation("a", &["x"]);
        context.external_table_binder_contexts_mut().insert(name, shape);
        let empty = TableBinderContexts::default();
        let bound = bind(&column(Some("a"), "x"), &context, &empty, &empty).unwrap();
        assert_eq!(bound.bounded_info.unwrap().scope, ColumnScope::External);
    }

    #[test]
    fn test_bind_variable_stays_unbound() {
        let empty = TableBinderContexts::default();
        let bound = bind(&column(None, "@MAX_ID"), &context(), &empty, &empty).unwrap();
        assert!(bound.bounded_info.is_none());
    }

    #[test]
    fn test_bind_unresolved_column_and_owner() {
        let own: TableBinderContexts = [relation("o", &["order_id"])].into_iter().collect();
        let empty = TableBinderContexts::default();
        let context = context();
        assert_eq!(
            bind(&column(Some("o"), "missing"), &context, &own, &empty).unwrap_err(),
            BindError::UnresolvedColumn {
                name: "o.missing".to_string(),
                segment: SegmentType::Predicate,
            }
        );
        assert_eq!(
            bind(&column(Some("x"), "order_id"), &context, &own, &empty).unwrap_err(),
            BindError::UnresolvedTable {
                name: "x".to_string(),
                segment: SegmentType::Predicate,
            }
        );
    }
}
