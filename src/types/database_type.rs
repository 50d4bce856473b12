use sqlparser::dialect::{
    AnsiDialect, Dialect, GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
};
use strum_macros::{Display, EnumIter, EnumString};

/// The SQL dialect a statement was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum DatabaseType {
    #[strum(serialize = "MySQL")]
    MySql,
    #[strum(serialize = "PostgreSQL")]
    PostgreSql,
    #[strum(serialize = "openGauss")]
    OpenGauss,
    #[strum(serialize = "Oracle")]
    Oracle,
    #[strum(serialize = "SQLServer")]
    SqlServer,
    #[strum(serialize = "SQL92")]
    Sql92,
}

impl DatabaseType {
    /// Schema searched for table names that carry no schema qualifier.
    pub fn default_schema_name(&self, database_name: &str) -> String {
        match self {
            DatabaseType::PostgreSql | DatabaseType::OpenGauss => "public".to_string(),
            DatabaseType::SqlServer => "dbo".to_string(),
            DatabaseType::MySql | DatabaseType::Oracle | DatabaseType::Sql92 => {
                database_name.to_lowercase()
            }
        }
    }

    /// Whether a two-part table name `a.b` names `database.table` rather than `schema.table`.
    pub fn is_database_qualified(&self) -> bool {
        matches!(self, DatabaseType::MySql)
    }

    pub fn sqlparser_dialect(&self) -> Box<dyn Dialect> {
        match self {
            DatabaseType::MySql => Box::new(MySqlDialect {}),
            DatabaseType::PostgreSql | DatabaseType::OpenGauss => Box::new(PostgreSqlDialect {}),
            DatabaseType::SqlServer => Box::new(MsSqlDialect {}),
            DatabaseType::Sql92 => Box::new(AnsiDialect {}),
            DatabaseType::Oracle => Box::new(GenericDialect {}),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use test_case::test_case;

    use super::*;

    #[test_case(DatabaseType::MySql, "sharding_db", "sharding_db")]
    #[test_case(DatabaseType::PostgreSql, "sharding_db", "public")]
    #[test_case(DatabaseType::OpenGauss, "sharding_db", "public")]
    #[test_case(DatabaseType::SqlServer, "sharding_db", "dbo")]
    #[test_case(DatabaseType::Oracle, "SHARDING_DB", "sharding_db")]
    fn test_default_schema_name(database_type: DatabaseType, database: &str, expected: &str) {
        assert_eq!(database_type.default_schema_name(database), expected);
    }

    #[test]
    fn test_database_type_round_trips_through_its_name() {
        assert_eq!(DatabaseType::PostgreSql.to_string(), "PostgreSQL");
        assert_eq!(DatabaseType::from_str("openGauss"), Ok(DatabaseType::OpenGauss));
    }
}
