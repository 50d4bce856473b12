mod dialect;
pub mod segment;

pub use dialect::*;
use enum_dispatch::enum_dispatch;
use segment::*;
use strum_macros::AsRefStr;

use crate::types::DatabaseType;

/// A clause was attached to a statement variant whose dialect has no such clause.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{segment} segment is not supported by {database_type} select statement")]
pub struct UnsupportedSegmentError {
    pub segment: &'static str,
    pub database_type: DatabaseType,
}

impl UnsupportedSegmentError {
    pub fn new(segment: &'static str, database_type: DatabaseType) -> Self {
        Self {
            segment,
            database_type,
        }
    }
}

/// Clauses every dialect's SELECT carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatementBase {
    pub projections: ProjectionsSegment,
    pub from: Option<TableSegment>,
    pub where_clause: Option<WhereSegment>,
    pub group_by: Option<GroupBySegment>,
    pub having: Option<HavingSegment>,
    pub order_by: Option<OrderBySegment>,
    pub combine: Option<CombineSegment>,
    pub parameter_marker_segments: Vec<ParameterMarkerSegment>,
    pub comment_segments: Vec<CommentSegment>,
    /// Names declared as variables in the surrounding routine; an unqualified
    /// identifier matching one of them is not a column reference.
    pub variable_names: Vec<String>,
}

/// Access to the dialect specific clauses of a SELECT statement.
///
/// Getters return `None` for clauses the dialect does not have; the matching
/// setters fail with [`UnsupportedSegmentError`].
#[enum_dispatch]
pub trait DialectSelectStatement {
    fn database_type(&self) -> DatabaseType;

    fn base(&self) -> &SelectStatementBase;

    fn base_mut(&mut self) -> &mut SelectStatementBase;

    fn with_segment(&self) -> Option<&WithSegment> {
        None
    }

    fn set_with_segment(&mut self, _segment: WithSegment) -> Result<(), UnsupportedSegmentError> {
        Err(UnsupportedSegmentError::new("WITH", self.database_type()))
    }

    fn limit_segment(&self) -> Option<&LimitSegment> {
        None
    }

    fn set_limit_segment(&mut self, _segment: LimitSegment) -> Result<(), UnsupportedSegmentError> {
        Err(UnsupportedSegmentError::new("LIMIT", self.database_type()))
    }

    fn lock_segment(&self) -> Option<&LockSegment> {
        None
    }

    fn set_lock_segment(&mut self, _segment: LockSegment) -> Result<(), UnsupportedSegmentError> {
        Err(UnsupportedSegmentError::new("LOCK", self.database_type()))
    }

    fn window_segment(&self) -> Option<&WindowSegment> {
        None
    }

    fn set_window_segment(
        &mut self,
        _segment: WindowSegment,
    ) -> Result<(), UnsupportedSegmentError> {
        Err(UnsupportedSegmentError::new("WINDOW", self.database_type()))
    }

    fn model_segment(&self) -> Option<&ModelSegment> {
        None
    }

    fn set_model_segment(&mut self, _segment: ModelSegment) -> Result<(), UnsupportedSegmentError> {
        Err(UnsupportedSegmentError::new("MODEL", self.database_type()))
    }
}

#[enum_dispatch(DialectSelectStatement)]
#[derive(Debug, Clone, PartialEq, AsRefStr)]
pub enum SelectStatement {
    MySqlSelectStatement,
    PostgreSqlSelectStatement,
    OpenGaussSelectStatement,
    OracleSelectStatement,
    SqlServerSelectStatement,
    Sql92SelectStatement,
}

impl SelectStatement {
    /// An empty statement of the given dialect.
    pub fn empty_of(database_type: DatabaseType) -> Self {
        match database_type {
            DatabaseType::MySql => MySqlSelectStatement::default().into(),
            DatabaseType::PostgreSql => PostgreSqlSelectStatement::default().into(),
            DatabaseType::OpenGauss => OpenGaussSelectStatement::default().into(),
            DatabaseType::Oracle => OracleSelectStatement::default().into(),
            DatabaseType::SqlServer => SqlServerSelectStatement::default().into(),
            DatabaseType::Sql92 => Sql92SelectStatement::default().into(),
        }
    }

    /// An empty statement of the same variant as `self`.
    pub fn new_like(&self) -> Self {
        Self::empty_of(self.database_type())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_new_like_keeps_variant() {
        for database_type in DatabaseType::iter() {
            let mut statement = SelectStatement::empty_of(database_type);
            statement.base_mut().variable_names.push("v".to_string());
            let empty = statement.new_like();
            assert_eq!(empty.database_type(), database_type);
            assert_eq!(empty.as_ref(), statement.as_ref());
            assert!(empty.base().variable_names.is_empty());
        }
    }

    #[test]
    fn test_unsupported_segment_is_rejected() {
        let mut statement = SelectStatement::empty_of(DatabaseType::Oracle);
        assert_eq!(
            statement.set_limit_segment(LimitSegment::default()),
            Err(UnsupportedSegmentError::new("LIMIT", DatabaseType::Oracle))
        );
        assert!(statement
            .set_model_segment(ModelSegment {
                text: "MODEL DIMENSION BY (c) MEASURES (s) RULES ()".to_string(),
            })
            .is_ok());
        assert!(statement.model_segment().is_some());

        let mut statement = SelectStatement::empty_of(DatabaseType::MySql);
        assert_eq!(
            statement
                .set_model_segment(ModelSegment {
                    text: String::new()
                })
                .unwrap_err()
                .to_string(),
            "MODEL segment is not supported by MySQL select statement"
        );
    }
}
