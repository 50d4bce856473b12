use super::{ColumnSegment, ExpressionSegment, Identifier, OwnerSegment, SubquerySegment};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionsSegment {
    pub distinct: bool,
    pub projections: Vec<ProjectionSegment>,
}

impl ProjectionsSegment {
    pub fn new(projections: Vec<ProjectionSegment>) -> Self {
        Self {
            distinct: false,
            projections,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionSegment {
    Column(ColumnProjectionSegment),
    Expression(ExpressionProjectionSegment),
    Shorthand(ShorthandProjectionSegment),
    Subquery(SubqueryProjectionSegment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProjectionSegment {
    pub column: ColumnSegment,
    pub alias: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionProjectionSegment {
    pub expr: ExpressionSegment,
    pub text: String,
    pub alias: Option<Identifier>,
}

/// `*` or `owner.*`. The binder fills `actual_projections` with the expanded columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShorthandProjectionSegment {
    pub owner: Option<OwnerSegment>,
    pub actual_projections: Vec<ProjectionSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryProjectionSegment {
    pub subquery: SubquerySegment,
    pub alias: Option<Identifier>,
}

impl ProjectionSegment {
    pub fn column(column: ColumnSegment) -> Self {
        ProjectionSegment::Column(ColumnProjectionSegment {
            column,
            alias: None,
        })
    }

    pub fn alias(&self) -> Option<&Identifier> {
        match self {
            ProjectionSegment::Column(p) => p.alias.as_ref(),
            ProjectionSegment::Expression(p) => p.alias.as_ref(),
            ProjectionSegment::Subquery(p) => p.alias.as_ref(),
            ProjectionSegment::Shorthand(_) => None,
        }
    }

    /// The output column name: the alias if present, otherwise the column name or
    /// expression text. Shorthands have no single label.
    pub fn column_label(&self) -> Option<Identifier> {
        if let Some(alias) = self.alias() {
            return Some(alias.clone());
        }
        match self {
            ProjectionSegment::Column(p) => Some(p.column.identifier.clone()),
            ProjectionSegment::Expression(p) => Some(Identifier::new(p.text.clone())),
            ProjectionSegment::Subquery(p) => Some(Identifier::new(p.subquery.text.clone())),
            ProjectionSegment::Shorthand(_) => None,
        }
    }

    /// Replace the alias, used for `WITH cte(a, b)` and `(...) AS d(a, b)` column lists.
    pub fn with_alias(&self, alias: Identifier) -> Self {
        let mut result = self.clone();
        match &mut result {
            ProjectionSegment::Column(p) => p.alias = Some(alias),
            ProjectionSegment::Expression(p) => p.alias = Some(alias),
            ProjectionSegment::Subquery(p) => p.alias = Some(alias),
            ProjectionSegment::Shorthand(_) => {}
        }
        result
    }
}
