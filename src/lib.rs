pub mod binder;
pub mod catalog;
pub mod parser;
pub mod statement;
pub mod types;
pub mod util;

pub use self::binder::{BindError, SelectStatementBinder};
pub use self::parser::{parse, ParseError};
