use sqlparser::ast::{
    Expr, FunctionArg, FunctionArgExpr, Ident, JoinConstraint, JoinOperator, LockType,
    ObjectName, OrderByExpr, Query, Select, SelectItem, SetExpr, SetOperator, TableAlias,
    TableFactor, TableWithJoins, Value,
};

use super::ParseError;
use crate::statement::segment::{
    ColumnProjectionSegment, ColumnSegment, CombineSegment, CombineType,
    CommonTableExpressionSegment, ExpressionProjectionSegment, ExpressionSegment,
    FunctionSegment, GroupBySegment, HavingSegment, Identifier, JoinTableSegment, JoinType,
    LimitSegment, LockSegment, LockStrength, OrderByItemSegment, OrderBySegment,
    OrderDirection, OwnerSegment, PaginationValueSegment, ParameterMarkerSegment,
    ParameterMarkerType, ProjectionSegment, ProjectionsSegment, ShorthandProjectionSegment,
    SimpleTableSegment, SubqueryProjectionSegment, SubquerySegment, SubqueryTableSegment,
    TableSegment, WhereSegment, WithSegment,
};
use crate::statement::{DialectSelectStatement, SelectStatement};
use crate::types::{DatabaseType, ScalarValue};

/// Converts `sqlparser` query trees into dialect select statements.
///
/// Parameter markers are collected in the order they are visited, which follows
/// the statement text: WITH, select list, FROM, WHERE, GROUP BY, HAVING,
/// ORDER BY, LIMIT, OFFSET. Every statement records the markers of the
/// statements nested in it as well.
pub struct StatementConverter {
    database_type: DatabaseType,
    parameter_markers: Vec<ParameterMarkerSegment>,
    question_marks: usize,
}

impl StatementConverter {
    pub fn new(database_type: DatabaseType) -> Self {
        Self {
            database_type,
            parameter_markers: vec![],
            question_marks: 0,
        }
    }

    pub fn convert_query(&mut self, query: &Query) -> Result<SelectStatement, ParseError> {
        let first_marker = self.parameter_markers.len();

        let with = query
            .with
            .as_ref()
            .map(|with| -> Result<_, ParseError> {
                let ctes = with
                    .cte_tables
                    .iter()
                    .map(|cte| -> Result<_, ParseError> {
                        let mut segment = CommonTableExpressionSegment::new(
                            Identifier::from(&cte.alias.name),
                            self.convert_subquery(&cte.query)?,
                        );
                        segment.column_aliases = Self::identifiers(&cte.alias.columns);
                        Ok(segment)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let mut segment = WithSegment::new(ctes);
                segment.recursive = with.recursive;
                Ok(segment)
            })
            .transpose()?;

        let mut statement = self.convert_set_expr(&query.body)?;
        if let Some(with) = with {
            statement.set_with_segment(with)?;
        }
        if !query.order_by.is_empty() {
            let items = query
                .order_by
                .iter()
                .map(|item| self.convert_order_by_item(item))
                .collect::<Result<Vec<_>, _>>()?;
            statement.base_mut().order_by = Some(OrderBySegment { items });
        }
        let row_count = query
            .limit
            .as_ref()
            .map(|limit| self.convert_pagination_value(limit))
            .transpose()?;
        let offset = query
            .offset
            .as_ref()
            .map(|offset| self.convert_pagination_value(&offset.value))
            .transpose()?;
        if row_count.is_some() || offset.is_some() {
            statement.set_limit_segment(LimitSegment { offset, row_count })?;
        }
        if let Some(lock) = &query.lock {
            let strength = match lock {
                LockType::Share => LockStrength::Share,
                LockType::Update => LockStrength::Update,
            };
            statement.set_lock_segment(LockSegment::new(strength))?;
        }

        statement.base_mut().parameter_marker_segments =
            self.parameter_markers[first_marker..].to_vec();
        Ok(statement)
    }

    fn convert_set_expr(&mut self, body: &SetExpr) -> Result<SelectStatement, ParseError> {
        match body {
            SetExpr::Select(select) => self.convert_select(select),
            SetExpr::Query(query) => self.convert_query(query),
            SetExpr::SetOperation {
                op,
                all,
                left,
                right,
            } => {
                let combine_type = match (op, all) {
                    (SetOperator::Union, false) => CombineType::Union,
                    (SetOperator::Union, true) => CombineType::UnionAll,
                    (SetOperator::Intersect, false) => CombineType::Intersect,
                    (SetOperator::Intersect, true) => CombineType::IntersectAll,
                    (SetOperator::Except, false) => CombineType::Except,
                    (SetOperator::Except, true) => CombineType::ExceptAll,
                };
                let left_statement = self.convert_set_expr(left)?;
                let right_statement = self.convert_set_expr(right)?;
                // The combined statement reads like its left operand; both
                // operands are kept whole in the combine segment.
                let mut statement = left_statement.clone();
                statement.base_mut().combine = Some(CombineSegment {
                    left: SubquerySegment::new(left_statement, left.to_string()),
                    combine_type,
                    right: SubquerySegment::new(right_statement, right.to_string()),
                });
                Ok(statement)
            }
            other => Err(ParseError::UnsupportedSyntax(other.to_string())),
        }
    }

    fn convert_select(&mut self, select: &Select) -> Result<SelectStatement, ParseError> {
        let first_marker = self.parameter_markers.len();
        let mut statement = SelectStatement::empty_of(self.database_type);

        let projections = select
            .projection
            .iter()
            .map(|item| self.convert_select_item(item))
            .collect::<Result<Vec<_>, _>>()?;
        let from = self.convert_from(&select.from)?;
        let where_clause = select
            .selection
            .as_ref()
            .map(|expr| self.convert_expr(expr).map(|expr| WhereSegment { expr }))
            .transpose()?;
        let group_by = if select.group_by.is_empty() {
            None
        } else {
            let items = select
                .group_by
                .iter()
                .map(|expr| self.convert_expr(expr).map(OrderByItemSegment::new))
                .collect::<Result<Vec<_>, _>>()?;
            Some(GroupBySegment { items })
        };
        let having = select
            .having
            .as_ref()
            .map(|expr| self.convert_expr(expr).map(|expr| HavingSegment { expr }))
            .transpose()?;

        let base = statement.base_mut();
        base.projections = ProjectionsSegment {
            distinct: select.distinct,
            projections,
        };
        base.from = from;
        base.where_clause = where_clause;
        base.group_by = group_by;
        base.having = having;
        base.parameter_marker_segments = self.parameter_markers[first_marker..].to_vec();
        Ok(statement)
    }

    fn convert_select_item(&mut self, item: &SelectItem) -> Result<ProjectionSegment, ParseError> {
        match item {
            SelectItem::UnnamedExpr(expr) => self.convert_projection(expr, None),
            SelectItem::ExprWithAlias { expr, alias } => {
                self.convert_projection(expr, Some(Identifier::from(alias)))
            }
            SelectItem::Wildcard(_) => Ok(ProjectionSegment::Shorthand(
                ShorthandProjectionSegment::default(),
            )),
            SelectItem::QualifiedWildcard(name, _) => {
                Ok(ProjectionSegment::Shorthand(ShorthandProjectionSegment {
                    owner: OwnerSegment::from_parts(&Self::identifiers(&name.0)),
                    actual_projections: vec![],
                }))
            }
        }
    }

    fn convert_projection(
        &mut self,
        expr: &Expr,
        alias: Option<Identifier>,
    ) -> Result<ProjectionSegment, ParseError> {
        let projection = match self.convert_expr(expr)? {
            ExpressionSegment::Column(column) => {
                ProjectionSegment::Column(ColumnProjectionSegment { column, alias })
            }
            ExpressionSegment::Subquery(subquery) => {
                ProjectionSegment::Subquery(SubqueryProjectionSegment { subquery, alias })
            }
            expr_segment => ProjectionSegment::Expression(ExpressionProjectionSegment {
                expr: expr_segment,
                text: expr.to_string(),
                alias,
            }),
        };
        Ok(projection)
    }

    /// Comma separated FROM items become a left-deep chain of comma joins.
    fn convert_from(
        &mut self,
        from: &[TableWithJoins],
    ) -> Result<Option<TableSegment>, ParseError> {
        let mut result: Option<TableSegment> = None;
        for table in from {
            let table = self.convert_table_with_joins(table)?;
            result = Some(match result {
                Some(left) => TableSegment::Join(Box::new(JoinTableSegment::new(
                    left,
                    table,
                    JoinType::Comma,
                ))),
                None => table,
            });
        }
        Ok(result)
    }

    fn convert_table_with_joins(
        &mut self,
        table: &TableWithJoins,
    ) -> Result<TableSegment, ParseError> {
        let mut result = self.convert_table_factor(&table.relation)?;
        for join in &table.joins {
            let right = self.convert_table_factor(&join.relation)?;
            let (join_type, constraint) = match &join.join_operator {
                JoinOperator::Inner(constraint) => (JoinType::Inner, Some(constraint)),
                JoinOperator::LeftOuter(constraint) => (JoinType::Left, Some(constraint)),
                JoinOperator::RightOuter(constraint) => (JoinType::Right, Some(constraint)),
                JoinOperator::FullOuter(constraint) => (JoinType::Full, Some(constraint)),
                JoinOperator::CrossJoin => (JoinType::Cross, None),
                other => return Err(ParseError::UnsupportedSyntax(format!("{:?}", other))),
            };
            let mut segment = JoinTableSegment::new(result, right, join_type);
            match constraint {
                Some(JoinConstraint::On(expr)) => {
                    segment.condition = Some(self.convert_expr(expr)?);
                }
                Some(JoinConstraint::Using(columns)) => {
                    segment.using = columns
                        .iter()
                        .map(|ident| ColumnSegment::new(Identifier::from(ident)))
                        .collect();
                }
                Some(JoinConstraint::Natural) => segment.natural = true,
                Some(JoinConstraint::None) | None => {}
            }
            result = TableSegment::Join(Box::new(segment));
        }
        Ok(result)
    }

    fn convert_table_factor(&mut self, factor: &TableFactor) -> Result<TableSegment, ParseError> {
        match factor {
            TableFactor::Table {
                name,
                alias,
                args: None,
                ..
            } => {
                let (table_name, owner) = Self::split_object_name(name)?;
                let mut segment = SimpleTableSegment::new(table_name);
                segment.owner = owner;
                segment.alias = Self::table_alias(alias)?;
                Ok(TableSegment::Simple(segment))
            }
            TableFactor::Derived {
                lateral,
                subquery,
                alias,
            } => {
                let mut segment = SubqueryTableSegment::new(
                    self.convert_subquery(subquery)?,
                    alias.as_ref().map(|alias| Identifier::from(&alias.name)),
                );
                segment.column_aliases = alias
                    .as_ref()
                    .map(|alias| Self::identifiers(&alias.columns))
                    .unwrap_or_default();
                segment.lateral = *lateral;
                Ok(TableSegment::Subquery(segment))
            }
            TableFactor::NestedJoin {
                table_with_joins,
                alias: None,
            } => self.convert_table_with_joins(table_with_joins),
            other => Err(ParseError::UnsupportedSyntax(other.to_string())),
        }
    }

    fn convert_subquery(&mut self, query: &Query) -> Result<SubquerySegment, ParseError> {
        Ok(SubquerySegment::new(
            self.convert_query(query)?,
            query.to_string(),
        ))
    }

    fn convert_order_by_item(
        &mut self,
        item: &OrderByExpr,
    ) -> Result<OrderByItemSegment, ParseError> {
        let mut segment = OrderByItemSegment::new(self.convert_expr(&item.expr)?);
        if item.asc == Some(false) {
            segment.direction = OrderDirection::Desc;
        }
        segment.nulls_first = item.nulls_first;
        Ok(segment)
    }

    fn convert_pagination_value(
        &mut self,
        expr: &Expr,
    ) -> Result<PaginationValueSegment, ParseError> {
        match self.convert_expr(expr)? {
            ExpressionSegment::ParameterMarker(marker) => {
                Ok(PaginationValueSegment::ParameterMarker(marker))
            }
            ExpressionSegment::Literal(ScalarValue::Int32(Some(value))) if value >= 0 => {
                Ok(PaginationValueSegment::NumberLiteral(value as u64))
            }
            ExpressionSegment::Literal(ScalarValue::Int64(Some(value))) if value >= 0 => {
                Ok(PaginationValueSegment::NumberLiteral(value as u64))
            }
            _ => Err(ParseError::UnsupportedSyntax(format!(
                "pagination value {}",
                expr
            ))),
        }
    }

    fn convert_expr(&mut self, expr: &Expr) -> Result<ExpressionSegment, ParseError> {
        let segment = match expr {
            Expr::Identifier(ident) => {
                ExpressionSegment::Column(ColumnSegment::new(Identifier::from(ident)))
            }
            Expr::CompoundIdentifier(idents) => {
                let (column, owner) = Self::split_object_name(&ObjectName(idents.clone()))?;
                let mut segment = ColumnSegment::new(column);
                segment.owner = owner;
                ExpressionSegment::Column(segment)
            }
            Expr::Value(Value::Placeholder(text)) => {
                ExpressionSegment::ParameterMarker(self.parameter_marker(text)?)
            }
            Expr::Value(value) => ExpressionSegment::Literal(ScalarValue::try_from(value)?),
            Expr::Nested(expr) => self.convert_expr(expr)?,
            Expr::BinaryOp { left, op, right } => ExpressionSegment::Binary {
                left: Box::new(self.convert_expr(left)?),
                operator: op.to_string(),
                right: Box::new(self.convert_expr(right)?),
            },
            Expr::UnaryOp { op, expr } => ExpressionSegment::Unary {
                operator: op.to_string(),
                expr: Box::new(self.convert_expr(expr)?),
            },
            Expr::Like {
                negated,
                expr,
                pattern,
                ..
            } => ExpressionSegment::Binary {
                left: Box::new(self.convert_expr(expr)?),
                operator: if *negated { "NOT LIKE" } else { "LIKE" }.to_string(),
                right: Box::new(self.convert_expr(pattern)?),
            },
            Expr::Between {
                expr,
                negated,
                low,
                high,
            } => ExpressionSegment::Between {
                left: Box::new(self.convert_expr(expr)?),
                low: Box::new(self.convert_expr(low)?),
                high: Box::new(self.convert_expr(high)?),
                not: *negated,
            },
            Expr::InList {
                expr,
                list,
                negated,
            } => ExpressionSegment::In {
                left: Box::new(self.convert_expr(expr)?),
                right: Box::new(ExpressionSegment::List(
                    list.iter()
                        .map(|item| self.convert_expr(item))
                        .collect::<Result<Vec<_>, _>>()?,
                )),
                not: *negated,
            },
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => ExpressionSegment::In {
                left: Box::new(self.convert_expr(expr)?),
                right: Box::new(ExpressionSegment::Subquery(self.convert_subquery(subquery)?)),
                not: *negated,
            },
            Expr::IsNull(expr) => ExpressionSegment::IsNull {
                expr: Box::new(self.convert_expr(expr)?),
                not: false,
            },
            Expr::IsNotNull(expr) => ExpressionSegment::IsNull {
                expr: Box::new(self.convert_expr(expr)?),
                not: true,
            },
            Expr::Function(function) => {
                let parameters = function
                    .args
                    .iter()
                    .map(|arg| {
                        let arg = match arg {
                            FunctionArg::Named { arg, .. } => arg,
                            FunctionArg::Unnamed(arg) => arg,
                        };
                        match arg {
                            FunctionArgExpr::Expr(expr) => self.convert_expr(expr),
                            FunctionArgExpr::QualifiedWildcard(name) => {
                                Ok(ExpressionSegment::Wildcard(OwnerSegment::from_parts(
                                    &Self::identifiers(&name.0),
                                )))
                            }
                            FunctionArgExpr::Wildcard => Ok(ExpressionSegment::Wildcard(None)),
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                ExpressionSegment::Function(FunctionSegment {
                    name: function.name.to_string(),
                    distinct: function.distinct,
                    parameters,
                    text: expr.to_string(),
                })
            }
            Expr::Cast { expr: inner, .. } => ExpressionSegment::Function(FunctionSegment {
                name: "CAST".to_string(),
                distinct: false,
                parameters: vec![self.convert_expr(inner)?],
                text: expr.to_string(),
            }),
            Expr::Case {
                operand,
                conditions,
                results,
                else_result,
            } => {
                let operand = operand
                    .as_ref()
                    .map(|operand| self.convert_expr(operand).map(Box::new))
                    .transpose()?;
                let when_then = conditions
                    .iter()
                    .zip(results.iter())
                    .map(|(when, then)| -> Result<_, ParseError> {
                        Ok((self.convert_expr(when)?, self.convert_expr(then)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let else_expr = else_result
                    .as_ref()
                    .map(|else_result| self.convert_expr(else_result).map(Box::new))
                    .transpose()?;
                ExpressionSegment::Case {
                    operand,
                    when_then,
                    else_expr,
                }
            }
            Expr::Subquery(query) => ExpressionSegment::Subquery(self.convert_subquery(query)?),
            Expr::Exists { subquery, negated } => ExpressionSegment::Exists {
                subquery: self.convert_subquery(subquery)?,
                not: *negated,
            },
            other => return Err(ParseError::UnsupportedSyntax(other.to_string())),
        };
        Ok(segment)
    }

    /// `?` markers are numbered in order of appearance, `$n` markers by `n`.
    fn parameter_marker(&mut self, text: &str) -> Result<ParameterMarkerSegment, ParseError> {
        let (index, marker_type) = if text == "?" {
            self.question_marks += 1;
            (self.question_marks - 1, ParameterMarkerType::Question)
        } else if let Some(position) = text.strip_prefix('$') {
            let position = position
                .parse::<usize>()
                .ok()
                .filter(|position| *position > 0)
                .ok_or_else(|| ParseError::UnsupportedSyntax(text.to_string()))?;
            (position - 1, ParameterMarkerType::Dollar)
        } else if text.starts_with(':') {
            (self.parameter_markers.len(), ParameterMarkerType::Colon)
        } else {
            return Err(ParseError::UnsupportedSyntax(text.to_string()));
        };
        let segment = ParameterMarkerSegment::new(index, marker_type, text);
        self.parameter_markers.push(segment.clone());
        Ok(segment)
    }

    /// Last part is the object itself, the rest its qualifier.
    fn split_object_name(
        name: &ObjectName,
    ) -> Result<(Identifier, Option<OwnerSegment>), ParseError> {
        let parts = Self::identifiers(&name.0);
        let (last, rest) = parts
            .split_last()
            .ok_or_else(|| ParseError::UnsupportedSyntax(name.to_string()))?;
        Ok((last.clone(), OwnerSegment::from_parts(rest)))
    }

    fn table_alias(alias: &Option<TableAlias>) -> Result<Option<Identifier>, ParseError> {
        match alias {
            Some(alias) if !alias.columns.is_empty() => {
                Err(ParseError::UnsupportedSyntax(alias.to_string()))
            }
            Some(alias) => Ok(Some(Identifier::from(&alias.name))),
            None => Ok(None),
        }
    }

    fn identifiers(idents: &[Ident]) -> Vec<Identifier> {
        idents.iter().map(Identifier::from).collect()
    }
}
