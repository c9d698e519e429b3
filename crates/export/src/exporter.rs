//! The export run: enumerate pages, resolve their content, write one file each.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{Content, Page};
use crate::observer::{ExportEvent, Observer, SkipReason, TracingObserver};
use crate::repo::Repository;
use crate::sanitize::file_name;
use exn::ResultExt;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Which pages to export, and where to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    /// Only export pages in this namespace.
    pub namespace: Option<i64>,
    /// Export at most this many pages (the lowest page IDs).
    pub limit: Option<NonZeroU64>,
}
impl Default for ExportOptions {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("pages"), namespace: None, limit: None }
    }
}

/// Counts reported at the end of a run.
///
/// `total` is the number of pages enumerated; `successful` the number of
/// files written. Pages skipped for missing content or failed writes are the
/// difference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub successful: u64,
    pub total: u64,
}
impl ExportSummary {
    pub fn failed(&self) -> u64 {
        self.total - self.successful
    }
}

/// Exports wiki pages from the database to `<sanitized title>.text` files.
///
/// The caller owns the connection lifecycle: [`connect`](Self::connect),
/// run any number of [`export_pages`](Self::export_pages), then
/// [`disconnect`](Self::disconnect). Everything happens sequentially on a
/// single connection.
pub struct Exporter<O = TracingObserver> {
    url: String,
    table_prefix: String,
    database: Option<Database>,
    observer: O,
}
impl Exporter<TracingObserver> {
    /// Exporter that reports progress through `tracing`.
    pub fn with_tracing(url: impl Into<String>) -> Self {
        Self::new(url, TracingObserver)
    }
}
impl<O: Observer> Exporter<O> {
    pub fn new(url: impl Into<String>, observer: O) -> Self {
        Self { url: url.into(), table_prefix: String::new(), database: None, observer }
    }

    /// Read from `{prefix}page`, `{prefix}revision` and `{prefix}text`.
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Use an already established connection instead of connecting by URL.
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn is_connected(&self) -> bool {
        self.database.as_ref().is_some_and(|db| !db.is_closed())
    }

    /// Open the database connection.
    ///
    /// Any previous connection is closed first. On failure the exporter stays
    /// disconnected, and [`export_pages`](Self::export_pages) will do nothing.
    pub async fn connect(&mut self) -> Result<()> {
        self.disconnect().await;
        match Database::connect(&self.url).await {
            Ok(database) => {
                self.database = Some(database);
                self.observer.notify(ExportEvent::Connected);
                Ok(())
            },
            Err(error) => {
                self.observer.notify(ExportEvent::ConnectionFailed(&error));
                Err(error)
            },
        }
    }

    /// Close the database connection, if there is one.
    ///
    /// Safe to call repeatedly, after a failed [`connect`](Self::connect), or
    /// without ever connecting.
    pub async fn disconnect(&mut self) {
        if let Some(database) = self.database.take() {
            let was_open = !database.is_closed();
            database.close().await;
            if was_open {
                self.observer.notify(ExportEvent::Disconnected);
            }
        }
    }

    /// Export every matching page, returning how many were written.
    ///
    /// Per-page problems (missing revision or text, failed write) skip that
    /// page and the run carries on. Anything that stops the run as a whole
    /// (no connection, unusable output directory, failed enumeration) is
    /// reported to the observer and counted as `0/0`.
    pub async fn export_pages(&self, options: &ExportOptions) -> ExportSummary {
        let Some(database) = self.database.as_ref().filter(|db| !db.is_closed()) else {
            self.observer.notify(ExportEvent::NotConnected);
            return ExportSummary::default();
        };
        let summary = match self.run(database, options).await {
            Ok(summary) => summary,
            Err(error) => {
                self.observer.notify(ExportEvent::RunFailed(&error));
                ExportSummary::default()
            },
        };
        self.observer.notify(ExportEvent::Finished(summary));
        summary
    }

    async fn run(&self, database: &Database, options: &ExportOptions) -> Result<ExportSummary> {
        let repo = Repository::new(database, &self.table_prefix)?;
        fs::create_dir_all(&options.output_dir)
            .await
            .or_raise(|| ErrorKind::OutputDirectory(options.output_dir.clone()))?;

        let pages = repo.pages(options.namespace, options.limit).await?;
        let mut summary = ExportSummary { successful: 0, total: pages.len() as u64 };
        self.observer.notify(ExportEvent::Discovered(summary.total));

        for page in &pages {
            self.observer.notify(ExportEvent::Processing(page));
            let content = match repo.content(page).await {
                Ok(Content::Text(text)) => text,
                Ok(Content::MissingRevision(revision_id)) => {
                    self.skip(page, SkipReason::MissingRevision(revision_id));
                    continue;
                },
                Ok(Content::MissingText(text_id)) => {
                    self.skip(page, SkipReason::MissingText(text_id));
                    continue;
                },
                Err(error) => {
                    self.skip(page, SkipReason::LookupFailed(&error));
                    continue;
                },
            };
            let path = options.output_dir.join(file_name(&page.title));
            match write(&path, &content).await {
                Ok(()) => {
                    summary.successful += 1;
                    self.observer.notify(ExportEvent::Exported { page, path: &path });
                },
                Err(error) => self.observer.notify(ExportEvent::WriteFailed { page, path: &path, error: &error }),
            }
        }
        Ok(summary)
    }

    fn skip(&self, page: &Page, reason: SkipReason<'_>) {
        self.observer.notify(ExportEvent::Skipped { page, reason });
    }
}

/// Write the stored text verbatim, replacing any existing file.
async fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content.as_bytes()).await.or_raise(|| ErrorKind::Write(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Keeps a one-line description of every event.
    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);
    impl Observer for Recorder {
        fn notify(&self, event: ExportEvent<'_>) {
            let line = match event {
                ExportEvent::Connected => "connected".to_string(),
                ExportEvent::ConnectionFailed(_) => "connection failed".to_string(),
                ExportEvent::Disconnected => "disconnected".to_string(),
                ExportEvent::NotConnected => "not connected".to_string(),
                ExportEvent::Discovered(n) => format!("discovered {n}"),
                ExportEvent::Processing(page) => format!("processing {}", page.id),
                ExportEvent::Exported { page, .. } => format!("exported {}", page.id),
                ExportEvent::Skipped { page, reason } => format!("skipped {} {reason:?}", page.id),
                ExportEvent::WriteFailed { page, .. } => format!("write failed {}", page.id),
                ExportEvent::RunFailed(error) => format!("run failed: {}", **error),
                ExportEvent::Finished(summary) => format!("finished {}/{}", summary.successful, summary.total),
            };
            self.0.lock().unwrap().push(line);
        }
    }
    impl Recorder {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
        fn contains(&self, line: &str) -> bool {
            self.lines().iter().any(|l| l == line)
        }
    }

    async fn wiki() -> Fixture {
        let fixture = Fixture::new("").await;
        fixture.page(1, 0, "Main Page", 11).await;
        fixture.page(2, 0, "Help:Contents", 12).await;
        fixture.page(3, 1, "Talk:Main Page", 13).await;
        fixture.page(4, 0, "Broken", 999).await;
        fixture.page(5, 0, "Empty blob", 15).await;
        fixture.revision(11, Some(101)).await;
        fixture.revision(12, Some(102)).await;
        fixture.revision(13, Some(103)).await;
        fixture.revision(15, Some(105)).await;
        fixture.text(101, Some("== Welcome ==\n'''MediaWiki''' has been installed.")).await;
        fixture.text(102, Some("* item")).await;
        fixture.text(103, Some(":reply")).await;
        fixture
    }

    fn exporter(fixture: &Fixture) -> Exporter<Recorder> {
        Exporter::new("sqlite::memory:", Recorder::default()).with_database(fixture.db.clone())
    }

    fn options(dir: &TempDir) -> ExportOptions {
        ExportOptions { output_dir: dir.path().join("pages"), ..ExportOptions::default() }
    }

    #[tokio::test]
    async fn test_export_all() {
        let fixture = wiki().await;
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&fixture);
        let options = options(&dir);

        let summary = exporter.export_pages(&options).await;
        assert_eq!(summary, ExportSummary { successful: 3, total: 5 });
        assert_eq!(summary.failed(), 2);

        let main = std::fs::read_to_string(options.output_dir.join("Main_Page.text")).unwrap();
        assert_eq!(main, "== Welcome ==\n'''MediaWiki''' has been installed.");
        assert!(options.output_dir.join("Help_Contents.text").is_file());
        assert!(options.output_dir.join("Talk_Main_Page.text").is_file());
        assert!(!options.output_dir.join("Broken.text").exists());
        assert!(!options.output_dir.join("Empty_blob.text").exists());
    }

    #[tokio::test]
    async fn test_missing_revision_is_skipped() {
        let fixture = wiki().await;
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&fixture);
        exporter.export_pages(&options(&dir)).await;
        let recorder = exporter.observer();
        assert!(recorder.contains("skipped 4 MissingRevision(999)"));
        assert!(recorder.contains("skipped 5 MissingText(105)"));
        assert!(!recorder.contains("exported 4"));
        assert_eq!(recorder.lines().last().unwrap(), "finished 3/5");
    }

    #[tokio::test]
    async fn test_namespace_and_limit() {
        let fixture = wiki().await;
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&fixture);
        let options = ExportOptions { namespace: Some(0), limit: NonZeroU64::new(2), ..options(&dir) };

        let summary = exporter.export_pages(&options).await;
        assert_eq!(summary, ExportSummary { successful: 2, total: 2 });
        let processed: Vec<String> =
            exporter.observer().lines().into_iter().filter(|l| l.starts_with("processing")).collect();
        assert_eq!(processed, vec!["processing 1", "processing 2"]);
        assert!(!options.output_dir.join("Talk_Main_Page.text").exists());
    }

    #[tokio::test]
    async fn test_limit_caps_results() {
        let fixture = Fixture::new("").await;
        for id in 1..=15 {
            fixture.page(id, 0, &format!("Page {id}"), id).await;
            fixture.revision(id, Some(id)).await;
            fixture.text(id, Some("content")).await;
        }
        fixture.page(16, 2, "User:Somebody", 16).await;
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&fixture);
        let options = ExportOptions { namespace: Some(0), limit: NonZeroU64::new(10), ..options(&dir) };

        let summary = exporter.export_pages(&options).await;
        assert_eq!(summary, ExportSummary { successful: 10, total: 10 });
        let processed: Vec<String> =
            exporter.observer().lines().into_iter().filter(|l| l.starts_with("processing")).collect();
        let expected: Vec<String> = (1..=10).map(|id| format!("processing {id}")).collect();
        assert_eq!(processed, expected);
    }

    #[tokio::test]
    async fn test_colliding_titles_last_writer_wins() {
        let fixture = Fixture::new("").await;
        fixture.page(1, 0, "A/B", 1).await;
        fixture.page(2, 0, "A:B", 2).await;
        fixture.revision(1, Some(1)).await;
        fixture.revision(2, Some(2)).await;
        fixture.text(1, Some("first")).await;
        fixture.text(2, Some("second")).await;
        let dir = TempDir::new().unwrap();
        let options = options(&dir);

        let summary = exporter(&fixture).export_pages(&options).await;
        assert_eq!(summary, ExportSummary { successful: 2, total: 2 });
        assert_eq!(std::fs::read_to_string(options.output_dir.join("A_B.text")).unwrap(), "second");
    }

    #[tokio::test]
    async fn test_write_failure_is_skipped() {
        let fixture = wiki().await;
        let dir = TempDir::new().unwrap();
        let options = options(&dir);
        // A directory where the file should go makes the write fail.
        std::fs::create_dir_all(options.output_dir.join("Main_Page.text")).unwrap();
        let exporter = exporter(&fixture);

        let summary = exporter.export_pages(&options).await;
        assert_eq!(summary, ExportSummary { successful: 2, total: 5 });
        assert!(exporter.observer().contains("write failed 1"));
        assert!(exporter.observer().contains("exported 2"));
    }

    #[tokio::test]
    async fn test_output_directory_failure() {
        let fixture = wiki().await;
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let exporter = exporter(&fixture);
        let options = ExportOptions { output_dir: blocker.join("pages"), ..ExportOptions::default() };

        assert_eq!(exporter.export_pages(&options).await, ExportSummary::default());
        assert!(exporter.observer().lines().iter().any(|l| l.starts_with("run failed: could not create output directory")));
    }

    #[tokio::test]
    async fn test_enumeration_failure() {
        // No tables at all.
        let db = Database::connect_in_memory().await.unwrap();
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new("sqlite::memory:", Recorder::default()).with_database(db);

        assert_eq!(exporter.export_pages(&options(&dir)).await, ExportSummary::default());
        assert_eq!(exporter.observer().lines(), vec!["run failed: database error", "finished 0/0"]);
    }

    #[tokio::test]
    async fn test_not_connected() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new("sqlite::memory:", Recorder::default());
        assert!(!exporter.is_connected());
        assert_eq!(exporter.export_pages(&options(&dir)).await, ExportSummary::default());
        assert_eq!(exporter.observer().lines(), vec!["not connected"]);
        // Nothing touched the filesystem.
        assert!(!dir.path().join("pages").exists());
    }

    #[tokio::test]
    async fn test_connection_lifecycle() {
        let mut exporter = Exporter::new("sqlite::memory:", Recorder::default());
        // Disconnecting before ever connecting is fine.
        exporter.disconnect().await;
        exporter.connect().await.unwrap();
        assert!(exporter.is_connected());
        exporter.disconnect().await;
        exporter.disconnect().await;
        assert!(!exporter.is_connected());
        assert_eq!(exporter.observer().lines(), vec!["connected", "disconnected"]);
    }

    #[tokio::test]
    async fn test_failed_connection() {
        let mut exporter = Exporter::new("sqlite:///definitely/not/a/real/dir/wiki.db", Recorder::default());
        let err = exporter.connect().await.unwrap_err();
        assert_eq!(*err, ErrorKind::Connection);
        assert!(!exporter.is_connected());
        exporter.disconnect().await;
        let dir = TempDir::new().unwrap();
        assert_eq!(exporter.export_pages(&options(&dir)).await, ExportSummary::default());
        assert_eq!(exporter.observer().lines(), vec!["connection failed", "not connected"]);
    }

    #[tokio::test]
    async fn test_failed_lookups_are_skipped() {
        let fixture = wiki().await;
        sqlx::query("DROP TABLE revision").execute(fixture.db.pool()).await.unwrap();
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&fixture);

        let summary = exporter.export_pages(&options(&dir)).await;
        assert_eq!(summary, ExportSummary { successful: 0, total: 5 });
        let skipped = exporter.observer().lines().into_iter().filter(|l| l.starts_with("skipped")).count();
        assert_eq!(skipped, 5);
    }
}
