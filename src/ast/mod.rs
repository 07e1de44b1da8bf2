pub mod operators;
pub mod values;

pub use self::operators::{Operator, SortOrder};
pub use self::values::{SqlRange, SqlValue};
