mod client;
mod models;
mod source;

pub use client::Database;
pub use models::{Column, CompositeTypeField, EnumType, ForeignKey, PrimaryKey, Table, View};
pub use source::{CatalogSnapshot, CatalogSource};

#[cfg(test)]
pub(crate) use source::tests::StaticSource;
