/// Deepest statement nesting (CTE bodies, derived tables, subqueries) a bind call accepts.
/// A bind at this depth has to fit in a default 2 MiB thread stack, debug builds included.
pub const MAX_NESTING_DEPTH: usize = 16;

pub(crate) static LOGGING_TARGET: &str = "sqlbind::binder";
