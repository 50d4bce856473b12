use super::{SegmentType, MAX_NESTING_DEPTH};
use crate::statement::UnsupportedSegmentError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BindError {
    #[error("unresolved table {name} in {segment} segment")]
    UnresolvedTable { name: String, segment: SegmentType },
    #[error("unresolved column {name} in {segment} segment")]
    UnresolvedColumn { name: String, segment: SegmentType },
    #[error("ambiguous column {name} in {segment} segment")]
    AmbiguousColumn { name: String, segment: SegmentType },
    #[error("duplicate table alias {0}")]
    DuplicateTableAlias(String),
    #[error("subquery in FROM must have an alias: {0}")]
    SubqueryMustHaveAlias(String),
    #[error("{name} has {actual} columns available but {expected} columns specified")]
    ColumnAliasCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("{0} used without tables in FROM")]
    ShorthandWithoutFrom(String),
    #[error("statement nesting depth {0} exceeds the limit of {}", MAX_NESTING_DEPTH)]
    NestingTooDeep(usize),
    #[error("{0}")]
    UnsupportedSegment(#[from] UnsupportedSegmentError),
}
