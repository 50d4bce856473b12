mod converter;
mod errors;

pub use converter::StatementConverter;
pub use errors::*;
use log::debug;
use sqlparser::ast::Statement;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer, Whitespace};

use crate::statement::segment::CommentSegment;
use crate::statement::{DialectSelectStatement, SelectStatement};
use crate::types::DatabaseType;

static LOGGING_TARGET: &str = "sqlbind::parser";

/// Parse `sql` with the dialect of `database_type` into select statements.
/// Any statement other than a query is rejected.
pub fn parse(sql: &str, database_type: DatabaseType) -> Result<Vec<SelectStatement>, ParseError> {
    let dialect = database_type.sqlparser_dialect();
    let statements = Parser::parse_sql(dialect.as_ref(), sql)?;
    let mut comments = collect_comments(sql, database_type)?;

    let mut result = Vec::with_capacity(statements.len());
    for (index, statement) in statements.iter().enumerate() {
        let query = match statement {
            Statement::Query(query) => query,
            other => return Err(ParseError::UnsupportedStatement(other.to_string())),
        };
        let mut select = StatementConverter::new(database_type).convert_query(query)?;
        if let Some(comments) = comments.get_mut(index) {
            select.base_mut().comment_segments = std::mem::take(comments);
        }
        debug!(
            target: LOGGING_TARGET,
            "parsed {} statement with {} parameter markers: {}",
            database_type,
            select.base().parameter_marker_segments.len(),
            query
        );
        result.push(select);
    }
    Ok(result)
}

/// Comments grouped by the statement they appear in, counting statements by
/// the semicolons that separate them.
fn collect_comments(
    sql: &str,
    database_type: DatabaseType,
) -> Result<Vec<Vec<CommentSegment>>, ParseError> {
    let dialect = database_type.sqlparser_dialect();
    let tokens = Tokenizer::new(dialect.as_ref(), sql).tokenize()?;
    let mut result = vec![vec![]];
    for token in tokens {
        match token {
            Token::SemiColon => result.push(vec![]),
            Token::Whitespace(Whitespace::SingleLineComment { comment, prefix }) => {
                if let Some(current) = result.last_mut() {
                    current.push(CommentSegment::new(format!(
                        "{}{}",
                        prefix,
                        comment.trim_end_matches(&['\r', '\n'][..])
                    )));
                }
            }
            Token::Whitespace(Whitespace::MultiLineComment(comment)) => {
                if let Some(current) = result.last_mut() {
                    current.push(CommentSegment::new(format!("/*{}*/", comment)));
                }
            }
            _ => {}
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::statement::segment::*;

    fn parse_one(sql: &str, database_type: DatabaseType) -> SelectStatement {
        let mut statements = parse(sql, database_type).unwrap();
        assert_eq!(statements.len(), 1);
        statements.remove(0)
    }

    #[test]
    fn test_parse_simple_select() {
        let statement = parse_one(
            "SELECT o.order_id, status AS s FROM t_order o WHERE o.user_id = 1",
            DatabaseType::MySql,
        );
        let base = statement.base();
        assert_eq!(base.projections.projections.len(), 2);
        match &base.projections.projections[0] {
            ProjectionSegment::Column(p) => {
                assert_eq!(p.column.to_string(), "o.order_id");
                assert!(p.column.bounded_info.is_none());
            }
            other => panic!("unexpected projection {:?}", other),
        }
        assert_eq!(
            base.projections.projections[1].column_label(),
            Some(Identifier::new("s"))
        );
        match &base.from {
            Some(TableSegment::Simple(t)) => {
                assert_eq!(t.name, Identifier::new("t_order"));
                assert_eq!(t.alias, Some(Identifier::new("o")));
            }
            other => panic!("unexpected from {:?}", other),
        }
        assert!(base.where_clause.is_some());
    }

    #[test]
    fn test_parse_joins_and_comma() {
        let statement = parse_one(
            "SELECT * FROM t_order o JOIN t_order_item i USING (order_id), t_user u",
            DatabaseType::PostgreSql,
        );
        match &statement.base().from {
            Some(TableSegment::Join(comma)) => {
                assert_eq!(comma.join_type, JoinType::Comma);
                match &comma.left {
                    TableSegment::Join(join) => {
                        assert_eq!(join.join_type, JoinType::Inner);
                        assert_eq!(join.using.len(), 1);
                        assert_eq!(join.using[0].identifier, Identifier::new("order_id"));
                    }
                    other => panic!("unexpected left {:?}", other),
                }
            }
            other => panic!("unexpected from {:?}", other),
        }
    }

    #[test]
    fn test_parse_cte_and_derived_table() {
        let statement = parse_one(
            "WITH a(x) AS (SELECT 1) SELECT d.x FROM (SELECT x FROM a) AS d",
            DatabaseType::PostgreSql,
        );
        let with = statement.with_segment().unwrap();
        assert_eq!(with.common_table_expressions.len(), 1);
        assert_eq!(
            with.common_table_expressions[0].column_aliases,
            vec![Identifier::new("x")]
        );
        match &statement.base().from {
            Some(TableSegment::Subquery(d)) => {
                assert_eq!(d.alias, Some(Identifier::new("d")));
                assert!(!d.lateral);
            }
            other => panic!("unexpected from {:?}", other),
        }
    }

    #[test]
    fn test_parse_with_is_rejected_by_sql92() {
        let err = parse("WITH a AS (SELECT 1) SELECT * FROM a", DatabaseType::Sql92).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedSegment(_)));
    }

    #[test]
    fn test_parse_union() {
        let statement = parse_one(
            "SELECT order_id FROM t_order UNION ALL SELECT order_id FROM t_order_item",
            DatabaseType::MySql,
        );
        let combine = statement.base().combine.as_ref().unwrap();
        assert_eq!(combine.combine_type, CombineType::UnionAll);
        assert_eq!(combine.right.text, "SELECT order_id FROM t_order_item");
    }

    #[test]
    fn test_parse_parameter_markers() {
        let statement = parse_one(
            "SELECT * FROM t_order WHERE user_id = ? AND status IN (SELECT status FROM t_status WHERE id = ?) LIMIT ?",
            DatabaseType::MySql,
        );
        let markers = &statement.base().parameter_marker_segments;
        assert_eq!(
            markers.iter().map(|m| m.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        match statement.limit_segment() {
            Some(LimitSegment {
                row_count: Some(PaginationValueSegment::ParameterMarker(marker)),
                ..
            }) => assert_eq!(marker.index, 2),
            other => panic!("unexpected limit {:?}", other),
        }
    }

    #[test]
    fn test_parse_dollar_markers() {
        let statement = parse_one(
            "SELECT * FROM t_order WHERE user_id = $2 AND order_id = $1",
            DatabaseType::PostgreSql,
        );
        let markers = &statement.base().parameter_marker_segments;
        assert_eq!(markers[0].index, 1);
        assert_eq!(markers[0].marker_type, ParameterMarkerType::Dollar);
        assert_eq!(markers[1].index, 0);
    }

    #[test]
    fn test_parse_comments() {
        let statements = parse(
            "/* first */ SELECT 1; -- second\nSELECT 2",
            DatabaseType::MySql,
        )
        .unwrap();
        assert_eq!(
            statements[0].base().comment_segments,
            vec![CommentSegment::new("/* first */")]
        );
        assert_eq!(
            statements[1].base().comment_segments,
            vec![CommentSegment::new("-- second")]
        );
    }

    #[test]
    fn test_parse_lock() {
        let statement = parse_one("SELECT * FROM t_order FOR UPDATE", DatabaseType::MySql);
        assert_eq!(
            statement.lock_segment().map(|lock| lock.strength),
            Some(LockStrength::Update)
        );
    }

    #[test_case("INSERT INTO t_order VALUES (1)")]
    #[test_case("DELETE FROM t_order")]
    fn test_parse_rejects_non_select(sql: &str) {
        let err = parse(sql, DatabaseType::MySql).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedStatement(_)));
    }
}
