use std::fmt;

use derive_new::new;
use strum_macros::Display;

use super::{Identifier, OwnerSegment};

/// Which visible scope a column reference was resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ColumnScope {
    /// A relation of the statement's own FROM clause.
    #[strum(serialize = "own")]
    Own,
    /// A CTE or externally supplied relation, referenced by qualifier.
    #[strum(serialize = "external")]
    External,
    /// A relation of an enclosing statement (correlated reference).
    #[strum(serialize = "outer")]
    Outer,
}

/// Where a bound column originally comes from.
#[derive(new, Debug, Clone, PartialEq)]
pub struct ColumnSegmentBoundedInfo {
    /// `None` when the column is produced by a derived table or CTE expression.
    pub original_database: Option<Identifier>,
    pub original_schema: Option<Identifier>,
    pub original_table: Identifier,
    pub original_column: Identifier,
    pub scope: ColumnScope,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSegment {
    pub identifier: Identifier,
    pub owner: Option<OwnerSegment>,
    /// Filled in by the binder.
    pub bounded_info: Option<ColumnSegmentBoundedInfo>,
}

impl ColumnSegment {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            owner: None,
            bounded_info: None,
        }
    }

    pub fn with_owner(identifier: Identifier, owner: OwnerSegment) -> Self {
        Self {
            identifier,
            owner: Some(owner),
            bounded_info: None,
        }
    }

    /// `owner.column` as written.
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColumnSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(owner) = &self.owner {
            write!(f, "{}.", owner)?;
        }
        write!(f, "{}", self.identifier)
    }
}

impl fmt::Display for ColumnSegmentBoundedInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(database) = &self.original_database {
            write!(f, "{}.", database.value)?;
        }
        if let Some(schema) = &self.original_schema {
            write!(f, "{}.", schema.value)?;
        }
        write!(
            f,
            "{}.{}({})",
            self.original_table.value, self.original_column.value, self.scope
        )
    }
}
