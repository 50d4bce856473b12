use super::{find_relation, ColumnSegmentBinder};
use crate::binder::{BindError, SegmentType, StatementBinderContext, TableBinderContexts};
use crate::statement::segment::LockSegment;

/// Binds `FOR UPDATE OF ...`. Tables must name relations visible to the
/// statement; columns are resolved like any other reference.
pub struct LockSegmentBinder;

impl LockSegmentBinder {
    pub fn bind(
        segment: &LockSegment,
        context: &StatementBinderContext,
        table_binder_contexts: &TableBinderContexts,
        outer_table_binder_contexts: &TableBinderContexts,
    ) -> Result<LockSegment, BindError> {
        for table in &segment.tables {
            find_relation(
                table.alias_or_name(),
                context,
                table_binder_contexts,
                outer_table_binder_contexts,
            )
            .ok_or_else(|| BindError::UnresolvedTable {
                name: table.to_string(),
                segment: SegmentType::Lock,
            })?;
        }
        let columns = segment
            .columns
            .iter()
            .map(|column| {
                ColumnSegmentBinder::bind(
                    column,
                    SegmentType::Lock,
                    context,
                    table_binder_contexts,
                    outer_table_binder_contexts,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LockSegment {
            strength: segment.strength,
            tables: segment.tables.clone(),
            columns,
            wait: segment.wait,
        })
    }
}
