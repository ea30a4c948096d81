use crate::config::Config;
use crate::db::models::{Column, CompositeTypeField, EnumType, ForeignKey, PrimaryKey, Table, View};
use crate::db::source::CatalogSource;
use crate::error::{Error, Result};
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, info, warn, Instrument};

const TABLES_QUERY: &str = "
    SELECT tablename::text AS name
    FROM pg_catalog.pg_tables
    WHERE tablename NOT LIKE 'sql_%' AND tablename NOT LIKE 'pg_%'";

const VIEWS_QUERY: &str = "
    SELECT table_name::text AS name
    FROM information_schema.views
    WHERE table_schema = ANY (current_schemas(false))";

const COLUMNS_QUERY: &str = "
    SELECT
        c.table_name::text AS table_name,
        c.column_name::text AS column_name,
        c.column_default::text AS column_default,
        c.is_nullable::text AS is_nullable,
        CASE
            WHEN c.data_type = 'USER-DEFINED' THEN c.udt_name::text
            ELSE c.data_type::text
        END AS data_type
    FROM information_schema.columns c
    WHERE c.table_schema NOT IN ('pg_catalog', 'information_schema')
    ORDER BY c.table_name, c.ordinal_position";

const FOREIGN_KEYS_QUERY: &str = "
    SELECT
        tc.constraint_name::text AS constraint_name,
        tc.table_name::text AS source_table,
        kcu.column_name::text AS source_column,
        ccu.table_name::text AS foreign_table,
        ccu.column_name::text AS foreign_column
    FROM information_schema.table_constraints AS tc
    JOIN information_schema.key_column_usage AS kcu
        ON tc.constraint_name = kcu.constraint_name
        AND tc.table_schema = kcu.table_schema
    JOIN information_schema.constraint_column_usage AS ccu
        ON ccu.constraint_name = tc.constraint_name
        AND ccu.table_schema = tc.table_schema
    WHERE tc.constraint_type = 'FOREIGN KEY'";

const PRIMARY_KEYS_QUERY: &str = "
    SELECT
        tco.constraint_name::text AS constraint_name,
        kcu.table_name::text AS table_name,
        kcu.column_name::text AS column_name
    FROM information_schema.table_constraints tco
    JOIN information_schema.key_column_usage kcu
        ON kcu.constraint_name = tco.constraint_name
        AND kcu.constraint_schema = tco.constraint_schema
    WHERE tco.constraint_type = 'PRIMARY KEY'";

const ENUM_TYPES_QUERY: &str = "
    SELECT
        pg_catalog.format_type(t.oid, NULL) AS name,
        t.typname::text AS internal_name,
        CASE
            WHEN t.typrelid != 0 THEN CAST('tuple' AS pg_catalog.text)
            WHEN t.typlen < 0 THEN CAST('var' AS pg_catalog.text)
            ELSE CAST(t.typlen AS pg_catalog.text)
        END AS size,
        ARRAY(
            SELECT e.enumlabel::text
            FROM pg_catalog.pg_enum e
            WHERE e.enumtypid = t.oid
            ORDER BY e.enumsortorder
        ) AS elements
    FROM pg_catalog.pg_type t
    LEFT JOIN pg_catalog.pg_namespace n ON n.oid = t.typnamespace
    WHERE (t.typrelid = 0
           OR (SELECT c.relkind = 'c' FROM pg_catalog.pg_class c WHERE c.oid = t.typrelid))
        AND NOT EXISTS (
            SELECT 1 FROM pg_catalog.pg_type el
            WHERE el.oid = t.typelem AND el.typarray = t.oid)
        AND n.nspname <> 'pg_catalog'
        AND n.nspname <> 'information_schema'
        AND pg_catalog.pg_type_is_visible(t.oid)
    ORDER BY 1";

const COMPOSITE_FIELDS_QUERY: &str = "
    SELECT
        a.udt_name::text AS type_name,
        a.attribute_name::text AS field_name,
        CASE
            WHEN a.data_type = 'USER-DEFINED' THEN a.attribute_udt_name::text
            ELSE a.data_type::text
        END AS data_type,
        a.ordinal_position::int4 AS position,
        a.is_nullable = 'NO' AS is_required
    FROM information_schema.attributes a
    WHERE a.udt_schema = ANY (current_schemas(false))
    ORDER BY a.udt_name, a.ordinal_position";

/// A live catalog session.
///
/// The connection future runs on its own task; [`Database::close`] drops the
/// client and waits for that task so the session is released before returning.
pub struct Database {
    client: Client,
    connection: JoinHandle<()>,
}

impl Database {
    pub async fn connect(config: &Config) -> Result<Self> {
        let (client, connection) = config
            .to_pg_config()
            .connect(NoTls)
            .await
            .map_err(|source| Error::Connection {
                host: config.host.clone(),
                port: config.port,
                database: config.database.clone(),
                source,
            })?;

        // Keep connection alive in background task
        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!("database connection error: {}", e);
            }
        });

        info!(host = %config.host, database = %config.database, "connected");
        Ok(Database { client, connection })
    }

    pub async fn close(self) {
        drop(self.client);
        if let Err(e) = self.connection.await {
            warn!("connection task ended abnormally: {}", e);
        }
        debug!("connection closed");
    }

    async fn fetch<T>(
        &self,
        fetch: &'static str,
        sql: &str,
        decode: fn(&Row) -> Result<T, tokio_postgres::Error>,
    ) -> Result<Vec<T>> {
        let span = tracing::debug_span!("catalog.query", fetch, rows = tracing::field::Empty);
        let rows = self
            .client
            .query(sql, &[])
            .instrument(span.clone())
            .await
            .map_err(|source| Error::Query { fetch, source })?;
        span.record("rows", rows.len());

        decode_rows(fetch, &rows, decode)
    }
}

/// Decodes every row or none; the error names the offending row.
fn decode_rows<R, T>(
    fetch: &'static str,
    rows: &[R],
    decode: impl Fn(&R) -> Result<T, tokio_postgres::Error>,
) -> Result<Vec<T>> {
    rows.iter()
        .enumerate()
        .map(|(row, r)| decode(r).map_err(|source| Error::Decode { fetch, row, source }))
        .collect()
}

impl CatalogSource for Database {
    async fn tables(&self) -> Result<Vec<Table>> {
        self.fetch("tables", TABLES_QUERY, Table::from_row).await
    }

    async fn views(&self) -> Result<Vec<View>> {
        self.fetch("views", VIEWS_QUERY, View::from_row).await
    }

    async fn columns(&self) -> Result<Vec<Column>> {
        self.fetch("columns", COLUMNS_QUERY, Column::from_row).await
    }

    async fn foreign_keys(&self) -> Result<Vec<ForeignKey>> {
        self.fetch("foreign_keys", FOREIGN_KEYS_QUERY, ForeignKey::from_row)
            .await
    }

    async fn primary_keys(&self) -> Result<Vec<PrimaryKey>> {
        self.fetch("primary_keys", PRIMARY_KEYS_QUERY, PrimaryKey::from_row)
            .await
    }

    async fn enum_types(&self) -> Result<Vec<EnumType>> {
        self.fetch("enum_types", ENUM_TYPES_QUERY, EnumType::from_row)
            .await
    }

    async fn composite_fields(&self) -> Result<Vec<CompositeTypeField>> {
        self.fetch(
            "composite_fields",
            COMPOSITE_FIELDS_QUERY,
            CompositeTypeField::from_row,
        )
        .await
    }
}
