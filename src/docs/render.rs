use crate::db::EnumType;
use crate::docs::document::{Block, Document, Inline, Table};
use crate::docs::type_docs::TypeDocs;
use crate::schema::{ColumnDescription, CompositeTypeDescription, Schema, TableDescription};
use std::collections::HashSet;

const SECTION_LEVEL: u8 = 1;
const ENTRY_LEVEL: u8 = 3;

const COLUMN_HEADERS: [&str; 5] = ["Name", "Type", "Default", "Nullable", "References"];
const FIELD_HEADERS: [&str; 4] = ["Name", "Type", "Position", "Required"];

const PRIMARY_KEY_TAG: &str = "PK";

/// Resolves type names to links: schema types first, then external docs.
struct TypeLinker<'a> {
    known: HashSet<&'a str>,
    docs: Option<&'a TypeDocs>,
}

impl<'a> TypeLinker<'a> {
    fn new(schema: &'a Schema, docs: Option<&'a TypeDocs>) -> Self {
        Self {
            known: schema.type_names().collect(),
            docs,
        }
    }

    fn link(&self, type_name: &str) -> Inline {
        if self.known.contains(type_name) {
            return Inline::anchor_link(type_name, type_name);
        }
        match self.docs.and_then(|docs| docs.url(type_name)) {
            Some(url) => Inline::url_link(type_name, url),
            None => Inline::text(type_name),
        }
    }
}

/// Walks the schema into a [`Document`].
///
/// Categories with no entries produce no heading at all.
pub fn render(schema: &Schema, type_docs: Option<&TypeDocs>) -> Document {
    let linker = TypeLinker::new(schema, type_docs);
    let mut document = Document::default();

    render_containers(&mut document, "Tables", &schema.tables, &linker);
    render_containers(&mut document, "Views", &schema.views, &linker);

    if !schema.custom_types.is_empty() || !schema.composite_types.is_empty() {
        document.push(Block::heading(SECTION_LEVEL, "Types"));
        for custom in &schema.custom_types {
            render_enum(&mut document, custom);
        }
        for composite in &schema.composite_types {
            render_composite(&mut document, composite, &linker);
        }
    }

    document
}

fn render_containers(
    document: &mut Document,
    title: &str,
    containers: &[TableDescription],
    linker: &TypeLinker,
) {
    if containers.is_empty() {
        return;
    }

    document.push(Block::heading(SECTION_LEVEL, title));
    for container in containers {
        document.push(Block::anchored_heading(ENTRY_LEVEL, &container.name));
        document.push(Block::Table(Table {
            headers: COLUMN_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: container
                .columns
                .iter()
                .map(|column| column_row(column, linker))
                .collect(),
        }));
    }
}

fn column_row(column: &ColumnDescription, linker: &TypeLinker) -> Vec<Inline> {
    let name = if column.is_primary_key {
        Inline::Tagged {
            text: column.name.clone(),
            tag: PRIMARY_KEY_TAG.to_string(),
        }
    } else {
        Inline::text(&column.name)
    };

    let references = match (&column.foreign_key, column.referenced_table()) {
        (Some(fk), Some(table)) => Inline::anchor_link(fk, table),
        _ => Inline::empty(),
    };

    vec![
        name,
        linker.link(&column.data_type),
        Inline::text(column.default.clone().unwrap_or_default()),
        Inline::text(bool_label(column.is_nullable)),
        references,
    ]
}

fn render_enum(document: &mut Document, custom: &EnumType) {
    document.push(Block::heading_with_anchor(
        ENTRY_LEVEL,
        &custom.name,
        &custom.internal_name,
    ));
    document.push(Block::List(
        custom.elements.iter().map(|e| e.trim().to_string()).collect(),
    ));
}

fn render_composite(
    document: &mut Document,
    composite: &CompositeTypeDescription,
    linker: &TypeLinker,
) {
    document.push(Block::anchored_heading(ENTRY_LEVEL, &composite.name));
    document.push(Block::Table(Table {
        headers: FIELD_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: composite
            .fields
            .iter()
            .map(|field| {
                vec![
                    Inline::text(&field.name),
                    linker.link(&field.data_type),
                    Inline::text(field.position.to_string()),
                    Inline::text(bool_label(field.is_required)),
                ]
            })
            .collect(),
    }));
}

fn bool_label(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
