use strum_macros::Display;

use super::{
    ColumnSegment, ExpressionSegment, Identifier, ParameterMarkerSegment, SimpleTableSegment,
    SubquerySegment,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WhereSegment {
    pub expr: ExpressionSegment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OrderDirection {
    #[strum(serialize = "ASC")]
    Asc,
    #[strum(serialize = "DESC")]
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItemSegment {
    pub expr: ExpressionSegment,
    pub direction: OrderDirection,
    pub nulls_first: Option<bool>,
}

impl OrderByItemSegment {
    pub fn new(expr: ExpressionSegment) -> Self {
        Self {
            expr,
            direction: OrderDirection::Asc,
            nulls_first: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBySegment {
    pub items: Vec<OrderByItemSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HavingSegment {
    pub expr: ExpressionSegment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBySegment {
    pub items: Vec<OrderByItemSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaginationValueSegment {
    NumberLiteral(u64),
    ParameterMarker(ParameterMarkerSegment),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LimitSegment {
    pub offset: Option<PaginationValueSegment>,
    pub row_count: Option<PaginationValueSegment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LockStrength {
    #[strum(serialize = "UPDATE")]
    Update,
    #[strum(serialize = "SHARE")]
    Share,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LockWait {
    #[strum(serialize = "")]
    Default,
    #[strum(serialize = "NOWAIT")]
    NoWait,
    #[strum(serialize = "SKIP LOCKED")]
    SkipLocked,
}

/// `FOR UPDATE [OF t, ...]`, `FOR SHARE`, Oracle's `FOR UPDATE OF t.c`.
#[derive(Debug, Clone, PartialEq)]
pub struct LockSegment {
    pub strength: LockStrength,
    pub tables: Vec<SimpleTableSegment>,
    pub columns: Vec<ColumnSegment>,
    pub wait: LockWait,
}

impl LockSegment {
    pub fn new(strength: LockStrength) -> Self {
        Self {
            strength,
            tables: vec![],
            columns: vec![],
            wait: LockWait::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowItemSegment {
    pub name: Identifier,
    pub partition_by: Vec<ExpressionSegment>,
    pub order_by: Vec<OrderByItemSegment>,
}

/// Named window definitions: `WINDOW w AS (PARTITION BY ... ORDER BY ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSegment {
    pub items: Vec<WindowItemSegment>,
}

/// Oracle `MODEL` clause, kept as text.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSegment {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpressionSegment {
    pub identifier: Identifier,
    pub subquery: SubquerySegment,
    pub column_aliases: Vec<Identifier>,
}

impl CommonTableExpressionSegment {
    pub fn new(identifier: Identifier, subquery: SubquerySegment) -> Self {
        Self {
            identifier,
            subquery,
            column_aliases: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithSegment {
    pub recursive: bool,
    pub common_table_expressions: Vec<CommonTableExpressionSegment>,
}

impl WithSegment {
    pub fn new(common_table_expressions: Vec<CommonTableExpressionSegment>) -> Self {
        Self {
            recursive: false,
            common_table_expressions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CombineType {
    #[strum(serialize = "UNION")]
    Union,
    #[strum(serialize = "UNION ALL")]
    UnionAll,
    #[strum(serialize = "INTERSECT")]
    Intersect,
    #[strum(serialize = "INTERSECT ALL")]
    IntersectAll,
    #[strum(serialize = "EXCEPT")]
    Except,
    #[strum(serialize = "EXCEPT ALL")]
    ExceptAll,
    #[strum(serialize = "MINUS")]
    Minus,
}

/// A set operation; both operands are complete SELECT statements.
#[derive(Debug, Clone, PartialEq)]
pub struct CombineSegment {
    pub left: SubquerySegment,
    pub combine_type: CombineType,
    pub right: SubquerySegment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentSegment {
    pub text: String,
}

impl CommentSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
