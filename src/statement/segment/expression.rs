use strum_macros::Display;

use super::{ColumnSegment, OwnerSegment};
use crate::statement::SelectStatement;
use crate::types::ScalarValue;

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionSegment {
    Column(ColumnSegment),
    Literal(ScalarValue),
    ParameterMarker(ParameterMarkerSegment),
    Binary {
        left: Box<ExpressionSegment>,
        operator: String,
        right: Box<ExpressionSegment>,
    },
    Unary {
        operator: String,
        expr: Box<ExpressionSegment>,
    },
    Between {
        left: Box<ExpressionSegment>,
        low: Box<ExpressionSegment>,
        high: Box<ExpressionSegment>,
        not: bool,
    },
    /// `left [NOT] IN right`, right being a `List` or a `Subquery`.
    In {
        left: Box<ExpressionSegment>,
        right: Box<ExpressionSegment>,
        not: bool,
    },
    List(Vec<ExpressionSegment>),
    IsNull {
        expr: Box<ExpressionSegment>,
        not: bool,
    },
    Function(FunctionSegment),
    Case {
        operand: Option<Box<ExpressionSegment>>,
        when_then: Vec<(ExpressionSegment, ExpressionSegment)>,
        else_expr: Option<Box<ExpressionSegment>>,
    },
    /// `*` or `t.*` as a function argument, e.g. `count(*)`.
    Wildcard(Option<OwnerSegment>),
    Subquery(SubquerySegment),
    Exists {
        subquery: SubquerySegment,
        not: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSegment {
    pub name: String,
    pub distinct: bool,
    pub parameters: Vec<ExpressionSegment>,
    pub text: String,
}

/// A nested SELECT together with its original text.
#[derive(Debug, Clone, PartialEq)]
pub struct SubquerySegment {
    pub select: Box<SelectStatement>,
    pub text: String,
}

impl SubquerySegment {
    pub fn new(select: SelectStatement, text: impl Into<String>) -> Self {
        Self {
            select: Box::new(select),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParameterMarkerType {
    #[strum(serialize = "?")]
    Question,
    #[strum(serialize = "$")]
    Dollar,
    #[strum(serialize = ":")]
    Colon,
}

/// A positional or named parameter placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMarkerSegment {
    /// zero based
    pub index: usize,
    pub marker_type: ParameterMarkerType,
    pub text: String,
}

impl ParameterMarkerSegment {
    pub fn new(index: usize, marker_type: ParameterMarkerType, text: impl Into<String>) -> Self {
        Self {
            index,
            marker_type,
            text: text.into(),
        }
    }
}
