mod assemble;
mod models;

pub use assemble::assemble;
pub use models::{
    ColumnDescription, CompositeField, CompositeTypeDescription, Schema, TableDescription,
};
