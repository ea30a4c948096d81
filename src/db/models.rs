use tokio_postgres::{Error, Row};

// Flat catalog records, one per row, no relationships materialized.

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
}

impl Table {
    pub fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            name: row.try_get("name")?,
        })
    }
}

/// Views share the table shape.
pub type View = Table;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub table: String,
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub default: Option<String>,
}

impl Column {
    pub fn from_row(row: &Row) -> Result<Self, Error> {
        let is_nullable: String = row.try_get("is_nullable")?;
        Ok(Self {
            table: row.try_get("table_name")?,
            name: row.try_get("column_name")?,
            data_type: row.try_get("data_type")?,
            is_nullable: is_nullable == "YES",
            default: row.try_get("column_default")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub constraint_name: String,
    pub source_table: String,
    pub source_column: String,
    pub foreign_table: String,
    pub foreign_column: String,
}

impl ForeignKey {
    pub fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            constraint_name: row.try_get("constraint_name")?,
            source_table: row.try_get("source_table")?,
            source_column: row.try_get("source_column")?,
            foreign_table: row.try_get("foreign_table")?,
            foreign_column: row.try_get("foreign_column")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    pub constraint_name: String,
    pub table: String,
    pub column: String,
}

impl PrimaryKey {
    pub fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            constraint_name: row.try_get("constraint_name")?,
            table: row.try_get("table_name")?,
            column: row.try_get("column_name")?,
        })
    }
}

/// A user-defined type with its enum labels, if any.
///
/// `size` is the catalog's textual length: `tuple`, `var` or a byte count.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub internal_name: String,
    pub size: String,
    pub elements: Vec<String>,
}

impl EnumType {
    pub fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            name: row.try_get("name")?,
            internal_name: row.try_get("internal_name")?,
            size: row.try_get("size")?,
            elements: row.try_get("elements")?,
        })
    }

    /// True when at least one label is non-blank.
    pub fn has_elements(&self) -> bool {
        self.elements.iter().any(|e| !e.trim().is_empty())
    }
}

/// One field of a composite (row) type.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeTypeField {
    pub type_name: String,
    pub field_name: String,
    pub data_type: String,
    pub position: i32,
    pub is_required: bool,
}

impl CompositeTypeField {
    pub fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            type_name: row.try_get("type_name")?,
            field_name: row.try_get("field_name")?,
            data_type: row.try_get("data_type")?,
            position: row.try_get("position")?,
            is_required: row.try_get("is_required")?,
        })
    }
}
