//! Read-only queries against the MediaWiki page, revision and text tables.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{Content, Page, PageRow};
use exn::ResultExt;
use sqlx::{Any, AnyPool, QueryBuilder};
use std::num::NonZeroU64;

const PREFIX_PLACEHOLDER: &str = "{prefix}";

/// Query text with the table prefix already substituted.
#[derive(Debug, Clone)]
struct Queries {
    pages: String,
    revision_text_id: String,
    text: String,
}
impl Queries {
    fn new(prefix: &str) -> Result<Self> {
        // The prefix is spliced into the SQL as an identifier, so it can't be a bind parameter.
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            exn::bail!(ErrorKind::InvalidTablePrefix(prefix.to_string()));
        }
        Ok(Self {
            pages: include_str!("../queries/select_pages.sql").replace(PREFIX_PLACEHOLDER, prefix),
            revision_text_id: include_str!("../queries/select_revision_text_id.sql").replace(PREFIX_PLACEHOLDER, prefix),
            text: include_str!("../queries/select_text.sql").replace(PREFIX_PLACEHOLDER, prefix),
        })
    }
}

/// Repository for resolving page content.
///
/// Content is found by a two-hop chain: the page's latest revision points at
/// a text blob, which holds the raw wikitext. Each hop is a separate point
/// lookup, and nothing is cached between pages.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: AnyPool,
    queries: Queries,
}
impl Repository {
    /// Create a repository for tables named `{prefix}page`, `{prefix}revision`
    /// and `{prefix}text`.
    pub fn new(db: &Database, table_prefix: &str) -> Result<Self> {
        Ok(Self { pool: db.pool().clone(), queries: Queries::new(table_prefix)? })
    }

    /// Enumerate pages that have a latest revision, ordered by page ID.
    pub async fn pages(&self, namespace: Option<i64>, limit: Option<NonZeroU64>) -> Result<Vec<Page>> {
        let mut query: QueryBuilder<Any> = QueryBuilder::new(self.queries.pages.trim_end());
        if let Some(namespace) = namespace {
            query.push(" AND page_namespace = ").push_bind(namespace);
        }
        query.push(" ORDER BY page_id");
        if let Some(limit) = limit {
            // Anything beyond i64::MAX is "everything" as far as the database is concerned.
            let limit = i64::try_from(limit.get()).unwrap_or(i64::MAX);
            query.push(" LIMIT ").push_bind(limit);
        }
        let rows: Vec<PageRow> =
            query.build_query_as().fetch_all(&self.pool).await.or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(Page::from).collect())
    }

    /// Look up which text blob a revision points at.
    pub async fn revision_text_id(&self, revision_id: i64) -> Result<Option<i64>> {
        let row: Option<(Option<i64>,)> = sqlx::query_as(&self.queries.revision_text_id)
            .bind(revision_id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(row.and_then(|(text_id,)| text_id))
    }

    /// Fetch the raw stored text of a blob.
    pub async fn text(&self, text_id: i64) -> Result<Option<String>> {
        let row: Option<(Option<String>,)> = sqlx::query_as(&self.queries.text)
            .bind(text_id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(row.and_then(|(text,)| text))
    }

    /// Resolve a page's current content through revision → text.
    ///
    /// A dangling pointer at either hop is reported as [`Content::MissingRevision`]
    /// or [`Content::MissingText`], never as an error. Errors are reserved for
    /// failed queries.
    pub async fn content(&self, page: &Page) -> Result<Content> {
        let Some(text_id) = self.revision_text_id(page.latest_revision_id).await? else {
            return Ok(Content::MissingRevision(page.latest_revision_id));
        };
        Ok(match self.text(text_id).await? {
            Some(text) => Content::Text(text),
            None => Content::MissingText(text_id),
        })
    }
}
