use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures raised by the collaborators around the schema pipeline.
///
/// Assembly and rendering never fail; everything here comes from reading the
/// config, talking to the database or writing the output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to connect to {host}:{port}/{database}")]
    Connection {
        host: String,
        port: u16,
        database: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("catalog query `{fetch}` failed")]
    Query {
        fetch: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("catalog query `{fetch}` returned a malformed row at index {row}")]
    Decode {
        fetch: &'static str,
        row: usize,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("could not write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
