use log::debug;

use super::{ColumnSegmentBinder, ExpressionSegmentBinder};
use crate::binder::{
    BindError, CaseInsensitiveIdentifier, SegmentType, SelectStatementBinder,
    StatementBinderContext, TableBinderContexts, TableSegmentBinderContext, LOGGING_TARGET,
};
use crate::catalog::TableCatalog;
use crate::statement::segment::{
    ColumnScope, ColumnSegment, ColumnSegmentBoundedInfo, Identifier, JoinTableSegment,
    OwnerSegment, ProjectionSegment, SimpleTableSegment, SubqueryTableSegment, TableSegment,
    TableSegmentBoundedInfo,
};
use crate::statement::DialectSelectStatement;

/// Binds the FROM clause. Relations become visible in the order they appear.
pub struct TableSegmentBinder;

impl TableSegmentBinder {
    /// Returns the bound FROM tree together with the relations it introduces,
    /// keyed by alias (or name when unaliased).
    pub fn bind(
        segment: &TableSegment,
        context: &StatementBinderContext,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<(TableSegment, TableBinderContexts), BindError> {
        let mut table_binder_contexts = TableBinderContexts::default();
        let bound = Self::bind_table(
            segment,
            context,
            &mut table_binder_contexts,
            outer_table_binder_contexts,
        )?;
        Ok((bound, table_binder_contexts))
    }

    fn bind_table(
        segment: &TableSegment,
        context: &StatementBinderContext,
        table_binder_contexts: &mut TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<TableSegment, BindError> {
        match segment {
            TableSegment::Simple(simple) => Ok(TableSegment::Simple(Self::bind_simple_table(
                simple,
                context,
                table_binder_contexts,
            )?)),
            TableSegment::Join(join) => Ok(TableSegment::Join(Box::new(Self::bind_join_table(
                join,
                context,
                table_binder_contexts,
                outer_table_binder_contexts,
            )?))),
            TableSegment::Subquery(subquery) => {
                Ok(TableSegment::Subquery(Self::bind_subquery_table(
                    subquery,
                    context,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )?))
            }
        }
    }

    fn bind_simple_table(
        segment: &SimpleTableSegment,
        context: &StatementBinderContext,
        table_binder_contexts: &mut TableBinderContexts,
    ) -> Result<SimpleTableSegment, BindError> {
        let mut result = segment.clone();
        let relation = CaseInsensitiveIdentifier::from(segment.alias_or_name());
        if segment.owner.is_none() {
            if let Some(external) = context
                .external_table_binder_contexts()
                .get(&CaseInsensitiveIdentifier::from(&segment.name))
            {
                debug!(
                    target: LOGGING_TARGET,
                    "bind table {} to external relation", segment.name
                );
                result.bounded_info = Some(TableSegmentBoundedInfo::External);
                Self::add_relation(table_binder_contexts, relation, external.clone())?;
                return Ok(result);
            }
        }

        let (database, schema) = Self::resolve_database_and_schema(segment, context);
        let table = context
            .catalog()
            .get_table(&database, &schema, &segment.name.value)
            .map_err(|_| BindError::UnresolvedTable {
                name: segment.to_string(),
                segment: SegmentType::From,
            })?;
        let database = Identifier::new(database);
        let schema = Identifier::new(schema);
        let table_context = Self::create_table_context(
            table,
            relation.original(),
            &database,
            &schema,
        );
        result.bounded_info = Some(TableSegmentBoundedInfo::Catalog { database, schema });
        Self::add_relation(table_binder_contexts, relation, table_context)?;
        Ok(result)
    }

    /// `[table]`, `[schema, table]` (`[database, table]` for dialects without
    /// schemas), `[database, schema, table]`.
    fn resolve_database_and_schema(
        segment: &SimpleTableSegment,
        context: &StatementBinderContext,
    ) -> (String, String) {
        let database_type = context.database_type();
        let default_database = context.default_database_name().to_string();
        match &segment.owner {
            None => {
                let schema = database_type.default_schema_name(&default_database);
                (default_database, schema)
            }
            Some(OwnerSegment {
                identifier,
                owner: None,
            }) => {
                if database_type.is_database_qualified() {
                    let schema = database_type.default_schema_name(&identifier.value);
                    (identifier.value.clone(), schema)
                } else {
                    (default_database, identifier.value.clone())
                }
            }
            Some(OwnerSegment {
                identifier,
                owner: Some(database),
            }) => (database.identifier.value.clone(), identifier.value.clone()),
        }
    }

    fn create_table_context(
        table: &TableCatalog,
        relation: &Identifier,
        database: &Identifier,
        schema: &Identifier,
    ) -> TableSegmentBinderContext {
        let projections = table.columns.iter().map(|column| {
            let name = Identifier::new(column.desc.name.clone());
            let mut segment =
                ColumnSegment::with_owner(name.clone(), OwnerSegment::new(relation.clone()));
            segment.bounded_info = Some(ColumnSegmentBoundedInfo::new(
                Some(database.clone()),
                Some(schema.clone()),
                Identifier::new(table.name.clone()),
                name,
                ColumnScope::Own,
            ));
            ProjectionSegment::column(segment)
        });
        TableSegmentBinderContext::new(projections)
    }

    fn bind_join_table(
        segment: &JoinTableSegment,
        context: &StatementBinderContext,
        table_binder_contexts: &mut TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<JoinTableSegment, BindError> {
        let left = Self::bind_table(
            &segment.left,
            context,
            table_binder_contexts,
            outer_table_binder_contexts,
        )?;
        let left_relation_count = table_binder_contexts.len();
        let right = Self::bind_table(
            &segment.right,
            context,
            table_binder_contexts,
            outer_table_binder_contexts,
        )?;

        let condition = segment
            .condition
            .as_ref()
            .map(|condition| {
                ExpressionSegmentBinder::bind(
                    condition,
                    SegmentType::JoinOn,
                    context,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )
            })
            .transpose()?;

        // USING columns must exist on both sides; the bound column refers to the left one.
        let mut using = Vec::with_capacity(segment.using.len());
        if !segment.using.is_empty() {
            let left_contexts = table_binder_contexts
                .iter()
                .take(left_relation_count)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<TableBinderContexts>();
            let right_contexts = table_binder_contexts
                .iter()
                .skip(left_relation_count)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<TableBinderContexts>();
            let empty = TableBinderContexts::default();
            for column in &segment.using {
                ColumnSegmentBinder::bind(
                    column,
                    SegmentType::JoinUsing,
                    context,
                    &right_contexts,
                    &empty,
                )?;
                using.push(ColumnSegmentBinder::bind(
                    column,
                    SegmentType::JoinUsing,
                    context,
                    &left_contexts,
                    &empty,
                )?);
            }
        }

        Ok(JoinTableSegment {
            left,
            right,
            join_type: segment.join_type,
            natural: segment.natural,
            condition,
            using,
        })
    }

    fn bind_subquery_table(
        segment: &SubqueryTableSegment,
        context: &StatementBinderContext,
        table_binder_contexts: &mut TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<SubqueryTableSegment, BindError> {
        let alias = segment
            .alias
            .clone()
            .ok_or_else(|| BindError::SubqueryMustHaveAlias(segment.subquery.text.clone()))?;
        // A LATERAL derived table also sees the relations to its left.
        let subquery_outer_contexts = if segment.lateral {
            let mut contexts = outer_table_binder_contexts.clone();
            for (relation, table_context) in table_binder_contexts.iter() {
                contexts.insert(relation.clone(), table_context.clone());
            }
            contexts
        } else {
            outer_table_binder_contexts.clone()
        };
        let select = SelectStatementBinder::bind_nested(
            &segment.subquery.select,
            context,
            &subquery_outer_contexts,
            context.external_table_binder_contexts(),
        )?;
        let table_context =
            TableSegmentBinderContext::new(select.base().projections.projections.clone())
                .with_column_aliases(&alias, &segment.column_aliases)?;
        Self::add_relation(
            table_binder_contexts,
            CaseInsensitiveIdentifier::from(&alias),
            table_context,
        )?;

        let mut result = segment.clone();
        result.subquery.select = Box::new(select);
        Ok(result)
    }

    fn add_relation(
        table_binder_contexts: &mut TableBinderContexts,
        relation: CaseInsensitiveIdentifier,
        table_context: TableSegmentBinderContext,
    ) -> Result<(), BindError> {
        if table_binder_contexts.contains_key(&relation) {
            return Err(BindError::DuplicateTableAlias(relation.to_string()));
        }
        table_binder_contexts.insert(relation, table_context);
        Ok(())
    }
}

/// Relation names introduced by a FROM tree, left to right.
pub(crate) fn relation_names(segment: &TableSegment) -> Vec<Identifier> {
    match segment {
        TableSegment::Simple(simple) => vec![simple.alias_or_name().clone()],
        TableSegment::Subquery(subquery) => subquery.alias.iter().cloned().collect(),
        TableSegment::Join(join) => {
            let mut names = relation_names(&join.left);
            names.extend(relation_names(&join.right));
            names
        }
    }
}
