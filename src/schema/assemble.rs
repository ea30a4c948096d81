use crate::db::{CatalogSnapshot, Column, CompositeTypeField, ForeignKey, PrimaryKey, Table};
use crate::schema::models::{
    ColumnDescription, CompositeField, CompositeTypeDescription, Schema, TableDescription,
};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Lookups built once per run over the flat key collections.
struct KeyIndex<'a> {
    columns: HashMap<&'a str, Vec<&'a Column>>,
    primary_keys: HashSet<(&'a str, &'a str)>,
    foreign_keys: HashMap<(&'a str, &'a str), String>,
}

impl<'a> KeyIndex<'a> {
    fn new(
        columns: &'a [Column],
        primary_keys: &'a [PrimaryKey],
        foreign_keys: &'a [ForeignKey],
    ) -> Self {
        let mut by_table: HashMap<&str, Vec<&Column>> = HashMap::new();
        for column in columns {
            by_table.entry(column.table.as_str()).or_default().push(column);
        }

        let primary_keys = primary_keys
            .iter()
            .map(|pk| (pk.table.as_str(), pk.column.as_str()))
            .collect();

        // First matching row wins
        let mut fks = HashMap::new();
        for fk in foreign_keys {
            fks.entry((fk.source_table.as_str(), fk.source_column.as_str()))
                .or_insert_with(|| format!("{}.{}", fk.foreign_table, fk.foreign_column));
        }

        Self {
            columns: by_table,
            primary_keys,
            foreign_keys: fks,
        }
    }

    /// Describes a table or view. Key lookups use the container's name.
    fn describe(&self, container: &Table) -> TableDescription {
        let name = container.name.as_str();
        let columns = self
            .columns
            .get(name)
            .map(|columns| {
                columns
                    .iter()
                    .map(|column| {
                        let key = (name, column.name.as_str());
                        ColumnDescription::new(
                            column,
                            self.primary_keys.contains(&key),
                            self.foreign_keys.get(&key).cloned(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        TableDescription {
            name: container.name.clone(),
            columns,
        }
    }
}

fn group_composites(rows: Vec<CompositeTypeField>) -> Vec<CompositeTypeDescription> {
    let mut groups: IndexMap<String, Vec<CompositeField>> = IndexMap::new();
    for row in rows {
        groups.entry(row.type_name).or_default().push(CompositeField {
            name: row.field_name,
            data_type: row.data_type,
            position: row.position,
            is_required: row.is_required,
        });
    }

    groups
        .into_iter()
        .map(|(name, fields)| CompositeTypeDescription { name, fields })
        .collect()
}

/// Joins the flat catalog collections into a [`Schema`].
///
/// Never fails: references to tables or types missing from the snapshot are
/// kept as-is and left for the renderer.
pub fn assemble(catalog: CatalogSnapshot) -> Schema {
    let index = KeyIndex::new(&catalog.columns, &catalog.primary_keys, &catalog.foreign_keys);

    let tables: Vec<_> = catalog.tables.iter().map(|t| index.describe(t)).collect();
    let views: Vec<_> = catalog.views.iter().map(|v| index.describe(v)).collect();

    let total = catalog.enum_types.len();
    let custom_types: Vec<_> = catalog
        .enum_types
        .into_iter()
        .filter(|t| t.has_elements())
        .collect();
    let composite_types = group_composites(catalog.composite_fields);

    debug!(
        tables = tables.len(),
        views = views.len(),
        custom_types = custom_types.len(),
        dropped_types = total - custom_types.len(),
        composite_types = composite_types.len(),
        "schema assembled"
    );

    Schema {
        tables,
        views,
        custom_types,
        composite_types,
    }
}
