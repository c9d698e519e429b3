//! Best-effort conversion of MediaWiki markup to Markdown.
//!
//! [`convert`] runs a fixed sequence of regex substitutions (see [`Pass`])
//! and never fails. Anything it doesn't recognize (templates, references,
//! HTML other than `<code>`) passes through unchanged. [`convert_dir`]
//! applies it to every `.text` file the exporter produced.

mod consts;
mod dir;
pub mod error;
mod markup;
mod table;

pub use crate::dir::{ConvertSummary, SOURCE_SUFFIX, TARGET_SUFFIX, convert_dir, convert_file};
pub use crate::markup::{Pass, convert};
