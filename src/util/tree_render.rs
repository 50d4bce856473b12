use std::fmt::{self, Write};

use itertools::Itertools;

use crate::statement::segment::{
    ColumnSegment, ExpressionSegment, ProjectionSegment, SubquerySegment, TableSegment,
    TableSegmentBoundedInfo,
};
use crate::statement::{DialectSelectStatement, SelectStatement};

/// Renders statements as indented trees, one clause or item per line. Bound
/// columns are followed by `-> database.schema.table.column(scope)`.
pub struct TreeRender;

impl TreeRender {
    fn column_to_string(column: &ColumnSegment) -> String {
        match &column.bounded_info {
            Some(info) => format!("{} -> {}", column, info),
            None => column.to_string(),
        }
    }

    fn expression_to_string(expr: &ExpressionSegment) -> String {
        match expr {
            ExpressionSegment::Column(column) => format!("[{}]", Self::column_to_string(column)),
            ExpressionSegment::Literal(value) => value.to_string(),
            ExpressionSegment::ParameterMarker(marker) => marker.text.clone(),
            ExpressionSegment::Binary {
                left,
                operator,
                right,
            } => format!(
                "{} {} {}",
                Self::expression_to_string(left),
                operator,
                Self::expression_to_string(right)
            ),
            ExpressionSegment::Unary { operator, expr } => {
                format!("{} {}", operator, Self::expression_to_string(expr))
            }
            ExpressionSegment::Between {
                left,
                low,
                high,
                not,
            } => format!(
                "{}{} BETWEEN {} AND {}",
                Self::expression_to_string(left),
                if *not { " NOT" } else { "" },
                Self::expression_to_string(low),
                Self::expression_to_string(high)
            ),
            ExpressionSegment::In { left, right, not } => format!(
                "{}{} IN {}",
                Self::expression_to_string(left),
                if *not { " NOT" } else { "" },
                Self::expression_to_string(right)
            ),
            ExpressionSegment::List(items) => format!(
                "({})",
                items.iter().map(Self::expression_to_string).join(", ")
            ),
            ExpressionSegment::IsNull { expr, not } => format!(
                "{} IS{} NULL",
                Self::expression_to_string(expr),
                if *not { " NOT" } else { "" }
            ),
            ExpressionSegment::Function(function) => format!(
                "{}({}{})",
                function.name,
                if function.distinct { "DISTINCT " } else { "" },
                function
                    .parameters
                    .iter()
                    .map(Self::expression_to_string)
                    .join(", ")
            ),
            ExpressionSegment::Case {
                operand,
                when_then,
                else_expr,
            } => {
                let mut result = "CASE".to_string();
                if let Some(operand) = operand {
                    result.push(' ');
                    result.push_str(&Self::expression_to_string(operand));
                }
                for (when, then) in when_then {
                    result.push_str(&format!(
                        " WHEN {} THEN {}",
                        Self::expression_to_string(when),
                        Self::expression_to_string(then)
                    ));
                }
                if let Some(else_expr) = else_expr {
                    result.push_str(&format!(" ELSE {}", Self::expression_to_string(else_expr)));
                }
                result.push_str(" END");
                result
            }
            ExpressionSegment::Wildcard(owner) => match owner {
                Some(owner) => format!("{}.*", owner),
                None => "*".to_string(),
            },
            ExpressionSegment::Subquery(subquery) => format!("({})", subquery.text),
            ExpressionSegment::Exists { subquery, not } => format!(
                "{}EXISTS ({})",
                if *not { "NOT " } else { "" },
                subquery.text
            ),
        }
    }

    /// Subqueries nested anywhere in an expression, left to right.
    fn collect_subqueries<'a>(
        expr: &'a ExpressionSegment,
        result: &mut Vec<&'a SubquerySegment>,
    ) {
        match expr {
            ExpressionSegment::Subquery(subquery) | ExpressionSegment::Exists { subquery, .. } => {
                result.push(subquery)
            }
            ExpressionSegment::Binary { left, right, .. }
            | ExpressionSegment::In { left, right, .. } => {
                Self::collect_subqueries(left, result);
                Self::collect_subqueries(right, result);
            }
            ExpressionSegment::Unary { expr, .. } | ExpressionSegment::IsNull { expr, .. } => {
                Self::collect_subqueries(expr, result)
            }
            ExpressionSegment::Between {
                left, low, high, ..
            } => {
                Self::collect_subqueries(left, result);
                Self::collect_subqueries(low, result);
                Self::collect_subqueries(high, result);
            }
            ExpressionSegment::List(items) => {
                items.iter().for_each(|e| Self::collect_subqueries(e, result))
            }
            ExpressionSegment::Function(function) => function
                .parameters
                .iter()
                .for_each(|e| Self::collect_subqueries(e, result)),
            ExpressionSegment::Case {
                operand,
                when_then,
                else_expr,
            } => {
                if let Some(operand) = operand {
                    Self::collect_subqueries(operand, result);
                }
                for (when, then) in when_then {
                    Self::collect_subqueries(when, result);
                    Self::collect_subqueries(then, result);
                }
                if let Some(else_expr) = else_expr {
                    Self::collect_subqueries(else_expr, result);
                }
            }
            ExpressionSegment::Column(_)
            | ExpressionSegment::Literal(_)
            | ExpressionSegment::ParameterMarker(_)
            | ExpressionSegment::Wildcard(_) => {}
        }
    }

    fn expression_tree_internal(
        label: &str,
        expr: &ExpressionSegment,
        level: usize,
        result: &mut dyn Write,
    ) -> fmt::Result {
        writeln!(
            result,
            "{}{}: {}",
            " ".repeat(level * 2),
            label,
            Self::expression_to_string(expr)
        )?;
        let mut subqueries = vec![];
        Self::collect_subqueries(expr, &mut subqueries);
        for subquery in subqueries {
            Self::select_statement_tree_internal(&subquery.select, level + 1, result)?;
        }
        Ok(())
    }

    fn projection_tree_internal(
        projection: &ProjectionSegment,
        level: usize,
        result: &mut dyn Write,
    ) -> fmt::Result {
        let indent = " ".repeat(level * 2);
        let alias = projection
            .alias()
            .map(|alias| format!(" AS {}", alias))
            .unwrap_or_default();
        match projection {
            ProjectionSegment::Column(p) => writeln!(
                result,
                "{}Column: {}{}",
                indent,
                Self::column_to_string(&p.column),
                alias
            ),
            ProjectionSegment::Expression(p) => Self::expression_tree_internal(
                &format!("Expression{}", alias),
                &p.expr,
                level,
                result,
            ),
            ProjectionSegment::Shorthand(p) => {
                let owner = p
                    .owner
                    .as_ref()
                    .map(|owner| format!("{}.", owner))
                    .unwrap_or_default();
                writeln!(result, "{}Shorthand: {}*", indent, owner)?;
                for actual in &p.actual_projections {
                    Self::projection_tree_internal(actual, level + 1, result)?;
                }
                Ok(())
            }
            ProjectionSegment::Subquery(p) => {
                writeln!(result, "{}Subquery{}", indent, alias)?;
                Self::select_statement_tree_internal(&p.subquery.select, level + 1, result)
            }
        }
    }

    fn table_tree_internal(
        table: &TableSegment,
        level: usize,
        result: &mut dyn Write,
    ) -> fmt::Result {
        let indent = " ".repeat(level * 2);
        match table {
            TableSegment::Simple(t) => {
                let alias = t
                    .alias
                    .as_ref()
                    .map(|alias| format!(" AS {}", alias))
                    .unwrap_or_default();
                let bound = match &t.bounded_info {
                    Some(TableSegmentBoundedInfo::Catalog { database, schema }) => {
                        format!(" -> {}.{}", database.value, schema.value)
                    }
                    Some(TableSegmentBoundedInfo::External) => " -> external".to_string(),
                    None => String::new(),
                };
                writeln!(result, "{}Table: {}{}{}", indent, t, alias, bound)
            }
            TableSegment::Join(join) => {
                let natural = if join.natural { "Natural " } else { "" };
                writeln!(result, "{}Join: {}{}", indent, natural, join.join_type)?;
                Self::table_tree_internal(&join.left, level + 1, result)?;
                Self::table_tree_internal(&join.right, level + 1, result)?;
                if let Some(condition) = &join.condition {
                    Self::expression_tree_internal("On", condition, level + 1, result)?;
                }
                if !join.using.is_empty() {
                    let using = join.using.iter().map(Self::column_to_string).join(", ");
                    writeln!(result, "{}  Using: {}", indent, using)?;
                }
                Ok(())
            }
            TableSegment::Subquery(t) => {
                let lateral = if t.lateral { "Lateral " } else { "" };
                let alias = t
                    .alias
                    .as_ref()
                    .map(|alias| format!(" AS {}", alias))
                    .unwrap_or_default();
                writeln!(result, "{}{}Subquery{}", indent, lateral, alias)?;
                Self::select_statement_tree_internal(&t.subquery.select, level + 1, result)
            }
        }
    }

    fn select_statement_tree_internal(
        statement: &SelectStatement,
        level: usize,
        result: &mut dyn Write,
    ) -> fmt::Result {
        let indent = " ".repeat(level * 2);
        let base = statement.base();
        let variant: &str = statement.as_ref();
        writeln!(result, "{}{}", indent, variant)?;
        if let Some(with) = statement.with_segment() {
            let names = with
                .common_table_expressions
                .iter()
                .map(|cte| cte.identifier.to_string())
                .join(", ");
            writeln!(result, "{}  With: {}", indent, names)?;
        }
        let distinct = if base.projections.distinct {
            " DISTINCT"
        } else {
            ""
        };
        writeln!(result, "{}  Projections:{}", indent, distinct)?;
        for projection in &base.projections.projections {
            Self::projection_tree_internal(projection, level + 2, result)?;
        }
        if let Some(from) = &base.from {
            writeln!(result, "{}  From:", indent)?;
            Self::table_tree_internal(from, level + 2, result)?;
        }
        if let Some(where_clause) = &base.where_clause {
            Self::expression_tree_internal("Where", &where_clause.expr, level + 1, result)?;
        }
        if let Some(combine) = &base.combine {
            writeln!(result, "{}  Combine: {}", indent, combine.combine_type)?;
            Self::select_statement_tree_internal(&combine.left.select, level + 2, result)?;
            Self::select_statement_tree_internal(&combine.right.select, level + 2, result)?;
        }
        if let Some(lock) = statement.lock_segment() {
            let columns = lock.columns.iter().map(Self::column_to_string).join(", ");
            writeln!(result, "{}  Lock: {} [{}]", indent, lock.strength, columns)?;
        }
        Ok(())
    }

    pub fn select_statement_tree(statement: &SelectStatement) -> String {
        let mut result = String::new();
        // writing into a String never fails
        let _ = Self::select_statement_tree_internal(statement, 0, &mut result);
        result.trim_end().to_string()
    }
}
