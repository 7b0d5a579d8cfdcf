mod column_schema;
mod dataset;
mod records;

pub use column_schema::*;
pub use dataset::*;
pub use records::*;
