//! Batch PDF upload queue.
//!
//! Files go out strictly one at a time, in selection order. Each item moves
//! `Pending -> Uploading -> Success | Error`, and an error never stops the
//! rest of the batch. Sending again retries only what has not succeeded.

use crate::error::ApiError;
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::future::Future;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success,
    Error,
}

impl UploadStatus {
    pub fn label(self) -> &'static str {
        match self {
            UploadStatus::Pending => "Pending",
            UploadStatus::Uploading => "Sending…",
            UploadStatus::Success => "Sent",
            UploadStatus::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    pub path: PathBuf,
    pub name: String,
    pub status: UploadStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub index: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadEvent {
    Started(usize),
    Finished { index: usize, ok: bool },
    Drained,
}

#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    items: Vec<UploadItem>,
    running: bool,
}

impl UploadQueue {
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn statuses(&self) -> Vec<UploadStatus> {
        self.items.iter().map(|item| item.status).collect()
    }

    /// A new selection throws away every previous status. Files without a
    /// `.pdf` extension are skipped.
    pub fn replace(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.items = paths
            .into_iter()
            .filter(|path| is_pdf(path))
            .map(|path| UploadItem {
                name: display_name(&path),
                path,
                status: UploadStatus::Pending,
            })
            .collect();
    }

    /// Sending is possible whenever something is left to deliver: an item
    /// that is still pending or that failed on an earlier run.
    pub fn can_send(&self) -> bool {
        !self.running
            && !self.items.is_empty()
            && !self
                .items
                .iter()
                .all(|item| item.status == UploadStatus::Success)
    }

    /// Marks the queue as running and hands out every item not yet
    /// delivered, in order. Failed items go back to `Pending` for the retry.
    pub fn start(&mut self) -> Vec<UploadJob> {
        let jobs: Vec<UploadJob> = self
            .items
            .iter_mut()
            .enumerate()
            .filter(|(_, item)| item.status != UploadStatus::Success)
            .map(|(index, item)| {
                item.status = UploadStatus::Pending;
                UploadJob {
                    index,
                    path: item.path.clone(),
                }
            })
            .collect();
        self.running = !jobs.is_empty();
        jobs
    }

    pub fn apply(&mut self, event: UploadEvent) {
        match event {
            UploadEvent::Started(index) => self.set_status(index, UploadStatus::Uploading),
            UploadEvent::Finished { index, ok } => {
                let status = if ok {
                    UploadStatus::Success
                } else {
                    UploadStatus::Error
                };
                self.set_status(index, status);
            }
            UploadEvent::Drained => self.running = false,
        }
    }

    fn set_status(&mut self, index: usize, status: UploadStatus) {
        if let Some(item) = self.items.get_mut(index) {
            item.status = status;
        }
    }
}

/// Destination for a single PDF.
pub trait PdfSink: Clone + Send + Sync + 'static {
    fn send(&self, path: PathBuf) -> impl Future<Output = Result<(), ApiError>> + Send;
}

enum Step {
    Next,
    Send(UploadJob),
    Done,
}

/// Runs the jobs through `sink` one after another. For every job the
/// stream yields `Started` before the request is issued and `Finished`
/// once it settles, and ends with a single `Drained`.
pub fn upload_events<S: PdfSink>(
    sink: S,
    jobs: Vec<UploadJob>,
) -> impl Stream<Item = UploadEvent> + Send {
    let state = (sink, VecDeque::from(jobs), Step::Next);

    stream::unfold(state, |(sink, mut pending, step)| async move {
        match step {
            Step::Next => match pending.pop_front() {
                Some(job) => {
                    let event = UploadEvent::Started(job.index);
                    Some((event, (sink, pending, Step::Send(job))))
                }
                None => Some((UploadEvent::Drained, (sink, pending, Step::Done))),
            },
            Step::Send(job) => {
                let ok = match sink.send(job.path.clone()).await {
                    Ok(()) => {
                        log::info!("Uploaded {}", job.path.display());
                        true
                    }
                    Err(err) => {
                        log::warn!("Upload of {} failed: {err}", job.path.display());
                        false
                    }
                };
                let event = UploadEvent::Finished {
                    index: job.index,
                    ok,
                };
                Some((event, (sink, pending, Step::Next)))
            }
            Step::Done => None,
        }
    })
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
