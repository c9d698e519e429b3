//! Progress reporting for export runs.
//!
//! The exporter never configures logging. Whoever constructs it hands over an
//! [`Observer`], which receives an [`ExportEvent`] for everything worth
//! reporting. [`TracingObserver`] turns them into `tracing` events; tests (or
//! a UI) can pass a closure instead.

use crate::ExportSummary;
use crate::error::Error;
use crate::models::Page;
use std::path::Path;

/// Why a page produced no file.
#[derive(Debug)]
pub enum SkipReason<'a> {
    /// The page's latest revision doesn't exist, or has no text pointer.
    MissingRevision(i64),
    /// The revision's text blob doesn't exist, or is `NULL`.
    MissingText(i64),
    /// Querying for the content failed.
    LookupFailed(&'a Error),
}

#[derive(Debug)]
pub enum ExportEvent<'a> {
    Connected,
    ConnectionFailed(&'a Error),
    Disconnected,
    /// An export was attempted without a live connection.
    NotConnected,
    /// Number of pages the enumeration query returned.
    Discovered(u64),
    Processing(&'a Page),
    Exported { page: &'a Page, path: &'a Path },
    Skipped { page: &'a Page, reason: SkipReason<'a> },
    WriteFailed { page: &'a Page, path: &'a Path, error: &'a Error },
    /// The run as a whole failed; it reports zero pages.
    RunFailed(&'a Error),
    Finished(ExportSummary),
}

pub trait Observer {
    fn notify(&self, event: ExportEvent<'_>);
}

impl<F> Observer for F
where
    F: Fn(ExportEvent<'_>),
{
    fn notify(&self, event: ExportEvent<'_>) {
        self(event)
    }
}

/// Reports export progress through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: ExportEvent<'_>) {
        match event {
            ExportEvent::Connected => tracing::info!("connected to wiki database"),
            ExportEvent::ConnectionFailed(error) => tracing::error!(?error, "error connecting to database"),
            ExportEvent::Disconnected => tracing::info!("database connection closed"),
            ExportEvent::NotConnected => tracing::error!("not connected to database"),
            ExportEvent::Discovered(pages) => tracing::info!(pages, "found pages to export"),
            ExportEvent::Processing(page) => {
                tracing::debug!(page_id = page.id, title = %page.title, "processing page")
            },
            ExportEvent::Exported { page, path } => {
                tracing::info!(page_id = page.id, path = %path.display(), "exported")
            },
            ExportEvent::Skipped { page, reason } => match reason {
                SkipReason::MissingRevision(revision_id) => {
                    tracing::warn!(page_id = page.id, title = %page.title, revision_id, "skipping page: no revision found")
                },
                SkipReason::MissingText(text_id) => {
                    tracing::warn!(page_id = page.id, title = %page.title, text_id, "skipping page: no text found")
                },
                SkipReason::LookupFailed(error) => {
                    tracing::warn!(page_id = page.id, title = %page.title, ?error, "skipping page: content lookup failed")
                },
            },
            ExportEvent::WriteFailed { page, path, error } => {
                tracing::error!(page_id = page.id, path = %path.display(), ?error, "error writing file")
            },
            ExportEvent::RunFailed(error) => tracing::error!(?error, "error during export"),
            ExportEvent::Finished(summary) => {
                tracing::info!(successful = summary.successful, total = summary.total, "export finished")
            },
        }
    }
}
