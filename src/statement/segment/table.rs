use std::fmt;

use strum_macros::Display;

use super::{ColumnSegment, ExpressionSegment, Identifier, OwnerSegment, SubquerySegment};

#[derive(Debug, Clone, PartialEq)]
pub enum TableSegment {
    Simple(SimpleTableSegment),
    Join(Box<JoinTableSegment>),
    Subquery(SubqueryTableSegment),
}

/// Where a table reference was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSegmentBoundedInfo {
    Catalog {
        database: Identifier,
        schema: Identifier,
    },
    /// A CTE or externally supplied relation shape.
    External,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTableSegment {
    pub name: Identifier,
    pub owner: Option<OwnerSegment>,
    pub alias: Option<Identifier>,
    /// Filled in by the binder.
    pub bounded_info: Option<TableSegmentBoundedInfo>,
}

impl SimpleTableSegment {
    pub fn new(name: Identifier) -> Self {
        Self {
            name,
            owner: None,
            alias: None,
            bounded_info: None,
        }
    }

    pub fn with_alias(mut self, alias: Identifier) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn with_owner(mut self, owner: OwnerSegment) -> Self {
        self.owner = Some(owner);
        self
    }

    /// The name other clauses use to refer to this table.
    pub fn alias_or_name(&self) -> &Identifier {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

impl fmt::Display for SimpleTableSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(owner) = &self.owner {
            write!(f, "{}.", owner)?;
        }
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    /// comma separated FROM items
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinTableSegment {
    pub left: TableSegment,
    pub right: TableSegment,
    pub join_type: JoinType,
    pub natural: bool,
    pub condition: Option<ExpressionSegment>,
    pub using: Vec<ColumnSegment>,
}

impl JoinTableSegment {
    pub fn new(left: TableSegment, right: TableSegment, join_type: JoinType) -> Self {
        Self {
            left,
            right,
            join_type,
            natural: false,
            condition: None,
            using: vec![],
        }
    }
}

/// A derived table: `(SELECT ...) AS alias(col, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryTableSegment {
    pub subquery: SubquerySegment,
    pub alias: Option<Identifier>,
    pub column_aliases: Vec<Identifier>,
    pub lateral: bool,
}

impl SubqueryTableSegment {
    pub fn new(subquery: SubquerySegment, alias: Option<Identifier>) -> Self {
        Self {
            subquery,
            alias,
            column_aliases: vec![],
            lateral: false,
        }
    }
}
