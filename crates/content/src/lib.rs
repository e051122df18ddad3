//! hbpress-content: structured content renderer.
//!
//! Lowers flat `part,text` rows into a document tree and substitutes the
//! rendered parts into `{{ name }}` placeholders of a markup template. A
//! [`ContentSchema`] says which parts exist and how each is rendered.

pub mod error;
pub mod inject;
pub mod manual;
pub mod markup;
pub mod render;
pub mod row;
pub mod schema;
pub mod tree;

pub use error::ContentError;
pub use inject::{inject, is_placeholder_name, placeholders};
pub use manual::{load_outline, outline_entries, render_manual, Manual, ManualPage, OutlineEntry};
pub use markup::{Child, Node};
pub use render::{placeholder_blocks, render_document, RenderedDocument};
pub use row::{content_rows, load_content, parse_content, ContentRow};
pub use schema::{ContentSchema, PartKind, PartSpec};
pub use tree::{build, BlockKind, ContentBlock, ContentTree};
