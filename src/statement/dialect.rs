use super::segment::*;
use super::{DialectSelectStatement, SelectStatementBase, UnsupportedSegmentError};
use crate::types::DatabaseType;

macro_rules! optional_segment {
    ($getter:ident, $setter:ident, $field:ident, $ty:ty) => {
        fn $getter(&self) -> Option<&$ty> {
            self.$field.as_ref()
        }

        fn $setter(&mut self, segment: $ty) -> Result<(), UnsupportedSegmentError> {
            self.$field = Some(segment);
            Ok(())
        }
    };
}

macro_rules! impl_dialect_select_statement {
    ($ty:ty, $database_type:expr, { $($segments:tt)* }) => {
        impl DialectSelectStatement for $ty {
            fn database_type(&self) -> DatabaseType {
                $database_type
            }

            fn base(&self) -> &SelectStatementBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut SelectStatementBase {
                &mut self.base
            }

            $($segments)*
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MySqlSelectStatement {
    pub base: SelectStatementBase,
    pub with: Option<WithSegment>,
    pub limit: Option<LimitSegment>,
    pub lock: Option<LockSegment>,
    pub window: Option<WindowSegment>,
}

impl_dialect_select_statement!(MySqlSelectStatement, DatabaseType::MySql, {
    optional_segment!(with_segment, set_with_segment, with, WithSegment);
    optional_segment!(limit_segment, set_limit_segment, limit, LimitSegment);
    optional_segment!(lock_segment, set_lock_segment, lock, LockSegment);
    optional_segment!(window_segment, set_window_segment, window, WindowSegment);
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostgreSqlSelectStatement {
    pub base: SelectStatementBase,
    pub with: Option<WithSegment>,
    pub limit: Option<LimitSegment>,
    pub lock: Option<LockSegment>,
    pub window: Option<WindowSegment>,
}

impl_dialect_select_statement!(PostgreSqlSelectStatement, DatabaseType::PostgreSql, {
    optional_segment!(with_segment, set_with_segment, with, WithSegment);
    optional_segment!(limit_segment, set_limit_segment, limit, LimitSegment);
    optional_segment!(lock_segment, set_lock_segment, lock, LockSegment);
    optional_segment!(window_segment, set_window_segment, window, WindowSegment);
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenGaussSelectStatement {
    pub base: SelectStatementBase,
    pub with: Option<WithSegment>,
    pub limit: Option<LimitSegment>,
    pub lock: Option<LockSegment>,
    pub window: Option<WindowSegment>,
}

impl_dialect_select_statement!(OpenGaussSelectStatement, DatabaseType::OpenGauss, {
    optional_segment!(with_segment, set_with_segment, with, WithSegment);
    optional_segment!(limit_segment, set_limit_segment, limit, LimitSegment);
    optional_segment!(lock_segment, set_lock_segment, lock, LockSegment);
    optional_segment!(window_segment, set_window_segment, window, WindowSegment);
});

/// Oracle has no LIMIT clause; row limiting is expressed with ROWNUM predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleSelectStatement {
    pub base: SelectStatementBase,
    pub with: Option<WithSegment>,
    pub lock: Option<LockSegment>,
    pub model: Option<ModelSegment>,
}

impl_dialect_select_statement!(OracleSelectStatement, DatabaseType::Oracle, {
    optional_segment!(with_segment, set_with_segment, with, WithSegment);
    optional_segment!(lock_segment, set_lock_segment, lock, LockSegment);
    optional_segment!(model_segment, set_model_segment, model, ModelSegment);
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlServerSelectStatement {
    pub base: SelectStatementBase,
    pub with: Option<WithSegment>,
    pub limit: Option<LimitSegment>,
}

impl_dialect_select_statement!(SqlServerSelectStatement, DatabaseType::SqlServer, {
    optional_segment!(with_segment, set_with_segment, with, WithSegment);
    optional_segment!(limit_segment, set_limit_segment, limit, LimitSegment);
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sql92SelectStatement {
    pub base: SelectStatementBase,
    pub limit: Option<LimitSegment>,
}

impl_dialect_select_statement!(Sql92SelectStatement, DatabaseType::Sql92, {
    optional_segment!(limit_segment, set_limit_segment, limit, LimitSegment);
});
