use crate::db::{Column, EnumType};

/// A column with its key annotations resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescription {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub default: Option<String>,
    pub is_primary_key: bool,
    /// `<table>.<column>` of the referenced column.
    pub foreign_key: Option<String>,
}

impl ColumnDescription {
    pub fn new(column: &Column, is_primary_key: bool, foreign_key: Option<String>) -> Self {
        Self {
            name: column.name.clone(),
            data_type: column.data_type.clone(),
            is_nullable: column.is_nullable,
            default: column.default.clone(),
            is_primary_key,
            foreign_key,
        }
    }

    /// The table part of the foreign key reference.
    pub fn referenced_table(&self) -> Option<&str> {
        self.foreign_key
            .as_deref()
            .map(|fk| fk.split_once('.').map_or(fk, |(table, _)| table))
    }
}

/// A table or view with its columns in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescription {
    pub name: String,
    pub columns: Vec<ColumnDescription>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeField {
    pub name: String,
    pub data_type: String,
    pub position: i32,
    pub is_required: bool,
}

/// A composite type; fields keep the order they were fetched in.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeTypeDescription {
    pub name: String,
    pub fields: Vec<CompositeField>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDescription>,
    pub views: Vec<TableDescription>,
    pub custom_types: Vec<EnumType>,
    pub composite_types: Vec<CompositeTypeDescription>,
}

impl Schema {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
            && self.views.is_empty()
            && self.custom_types.is_empty()
            && self.composite_types.is_empty()
    }

    /// Anchors of every enum and composite type, the targets of type links.
    ///
    /// Enums are addressed by their unquoted catalog name, the form columns
    /// report their type in.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.custom_types
            .iter()
            .map(|t| t.internal_name.as_str())
            .chain(self.composite_types.iter().map(|t| t.name.as_str()))
    }
}
