mod document;
pub mod markdown;
mod render;
mod type_docs;

pub use document::{Block, Document, Inline, LinkTarget, Table};
pub use render::render;
pub use type_docs::TypeDocs;
