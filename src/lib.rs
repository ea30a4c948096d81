pub mod cli;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod output;
pub mod schema;

use std::path::Path;
use tracing::info;

pub use cli::Cli;
pub use error::{Error, Result};

use config::Config;
use db::{CatalogSnapshot, Database};
use docs::TypeDocs;

/// Assembles, renders and serializes a fetched catalog snapshot.
pub fn document_from_snapshot(snapshot: CatalogSnapshot, type_docs: Option<&TypeDocs>) -> String {
    let schema = schema::assemble(snapshot);
    let document = docs::render(&schema, type_docs);
    docs::markdown::to_markdown(&document)
}

/// Runs the whole pipeline: config, catalog, Markdown, file.
///
/// The database session is closed before the output is written, whether or
/// not fetching succeeded. Nothing is written unless every step succeeds.
pub async fn generate(config_path: &Path, output_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;

    let database = Database::connect(&config).await?;
    let snapshot = CatalogSnapshot::fetch(&database).await;
    database.close().await;
    let snapshot = snapshot?;

    info!(
        tables = snapshot.tables.len(),
        views = snapshot.views.len(),
        columns = snapshot.columns.len(),
        "catalog fetched"
    );

    let markdown = document_from_snapshot(snapshot, Some(&TypeDocs::postgres()));
    output::write_atomic(output_path, &markdown)?;

    info!(path = %output_path.display(), bytes = markdown.len(), "documentation written");
    Ok(())
}
