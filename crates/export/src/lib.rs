//! Export MediaWiki pages straight from the database to flat text files.
//!
//! Targets the pre-1.31 MediaWiki schema, where content is found through
//! three tables:
//!
//! - `page`: `page_id`, `page_namespace`, `page_title`, `page_latest` (→ `rev_id`)
//! - `revision`: `rev_id`, `rev_text_id` (→ `old_id`)
//! - `text`: `old_id`, `old_text`
//!
//! Each exported page becomes one `<sanitized title>.text` file holding the
//! raw wikitext, unmodified. The database is only ever read.
//!
//! # Architecture
//! - [`Database`] owns the single connection used for a run.
//! - [`Repository`] issues the enumeration query and the two point lookups
//!   that resolve a page's content.
//! - [`Exporter`] drives a run and reports progress to an injected
//!   [`Observer`].

mod db;
pub mod error;
mod exporter;
mod models;
pub mod observer;
mod repo;
mod sanitize;
#[cfg(test)]
mod testing;

pub use crate::db::Database;
pub use crate::exporter::{ExportOptions, ExportSummary, Exporter};
pub use crate::models::{Content, Page};
pub use crate::observer::{ExportEvent, Observer, SkipReason, TracingObserver};
pub use crate::repo::Repository;
pub use crate::sanitize::{EXTENSION, MAX_STEM_LENGTH, file_name, sanitize};
