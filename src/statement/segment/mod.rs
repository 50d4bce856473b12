mod clause;
mod column;
mod expression;
mod identifier;
mod projection;
mod table;

pub use clause::*;
pub use column::*;
pub use expression::*;
pub use identifier::*;
pub use projection::*;
pub use table::*;
