mod bind_context;
mod binding;
mod constants;
mod errors;
mod segment;
mod statement;

pub use bind_context::*;
pub use binding::*;
pub use constants::*;
pub use errors::*;
pub use segment::*;
pub use statement::*;

#[cfg(test)]
pub(crate) mod test_util;
