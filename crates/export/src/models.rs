/// A wiki page as enumerated from the page table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub id: i64,
    pub title: String,
    /// Foreign key into the revision table.
    pub latest_revision_id: i64,
}

/// Outcome of following a page's revision pointer to its stored text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// The page points at a revision that does not exist (or has no text pointer).
    MissingRevision(i64),
    /// The revision points at a text blob that does not exist (or is `NULL`).
    MissingText(i64),
}

#[derive(sqlx::FromRow)]
pub(crate) struct PageRow {
    page_id: i64,
    page_title: String,
    page_latest: i64,
}
impl From<PageRow> for Page {
    fn from(row: PageRow) -> Self {
        Self { id: row.page_id, title: row.page_title, latest_revision_id: row.page_latest }
    }
}
