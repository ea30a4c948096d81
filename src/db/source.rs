use crate::db::models::{Column, CompositeTypeField, EnumType, ForeignKey, PrimaryKey, Table, View};
use crate::error::Result;
use tracing::debug;

/// Anything that can hand over the raw catalog collections.
///
/// Each fetch is independent; [`CatalogSnapshot::fetch`] runs them together.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    async fn tables(&self) -> Result<Vec<Table>>;
    async fn views(&self) -> Result<Vec<View>>;
    async fn columns(&self) -> Result<Vec<Column>>;
    async fn foreign_keys(&self) -> Result<Vec<ForeignKey>>;
    async fn primary_keys(&self) -> Result<Vec<PrimaryKey>>;
    async fn enum_types(&self) -> Result<Vec<EnumType>>;
    async fn composite_fields(&self) -> Result<Vec<CompositeTypeField>>;
}

/// Every flat collection the assembler needs, fully decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub tables: Vec<Table>,
    pub views: Vec<View>,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
    pub primary_keys: Vec<PrimaryKey>,
    pub enum_types: Vec<EnumType>,
    pub composite_fields: Vec<CompositeTypeField>,
}

impl CatalogSnapshot {
    /// Runs all fetches concurrently and fails on the first error.
    pub async fn fetch<S: CatalogSource>(source: &S) -> Result<Self> {
        let (tables, views, columns, foreign_keys, primary_keys, enum_types, composite_fields) =
            tokio::try_join!(
                source.tables(),
                source.views(),
                source.columns(),
                source.foreign_keys(),
                source.primary_keys(),
                source.enum_types(),
                source.composite_fields(),
            )?;

        debug!(
            tables = tables.len(),
            views = views.len(),
            columns = columns.len(),
            foreign_keys = foreign_keys.len(),
            primary_keys = primary_keys.len(),
            enum_types = enum_types.len(),
            composite_fields = composite_fields.len(),
            "catalog snapshot fetched"
        );

        Ok(Self {
            tables,
            views,
            columns,
            foreign_keys,
            primary_keys,
            enum_types,
            composite_fields,
        })
    }
}
