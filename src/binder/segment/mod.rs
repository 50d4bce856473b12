mod column;
mod combine;
mod expression;
mod lock;
mod projection;
mod table;
mod where_segment;

pub use column::ColumnSegmentBinder;
pub(crate) use column::find_relation;
pub use combine::CombineSegmentBinder;
pub use expression::{ExpressionSegmentBinder, SubquerySegmentBinder};
pub use lock::LockSegmentBinder;
pub use projection::ProjectionsSegmentBinder;
pub(crate) use table::relation_names;
pub use table::TableSegmentBinder;
pub use where_segment::WhereSegmentBinder;
