//! Scripted collaborators for driving the controller in tests.
//!
//! Network calls park on oneshot channels so a test decides when (and how)
//! each fetch or transfer completes, while a `LocalPool` runs the spawned
//! futures up to the next suspension point.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use futures::channel::oneshot;

use super::error::{ServiceError, TransferError};
use super::services::{
    ListingService, ListingView, Notifier, ProgressSink, ServiceFuture, UploadSource,
    UploadTransport, UploadView,
};
use crate::models::{
    Breadcrumb, DirectoryPath, FileEntry, Listing, Notification, UploadEntry, UploadId,
    UploadRequest, ViewStyle,
};

/// File listing with one entry per name.
pub fn files(names: &[&str]) -> Listing {
    Listing::Files(
        names
            .iter()
            .map(|name| FileEntry {
                path: format!("/{name}"),
                name: (*name).to_string(),
                ..FileEntry::default()
            })
            .collect(),
    )
}

// =============================================================================
// Listing
// =============================================================================

type ListingResponder = oneshot::Sender<Result<Listing, ServiceError>>;

#[derive(Default)]
pub struct ScriptedListing {
    requests: RefCell<Vec<(DirectoryPath, ViewStyle)>>,
    responders: RefCell<VecDeque<ListingResponder>>,
}

impl ScriptedListing {
    pub fn requests(&self) -> Vec<(DirectoryPath, ViewStyle)> {
        self.requests.borrow().clone()
    }

    pub fn requested_paths(&self) -> Vec<DirectoryPath> {
        self.requests.borrow().iter().map(|(p, _)| p.clone()).collect()
    }

    /// Complete the oldest outstanding fetch.
    pub fn respond(&self, result: Result<Listing, ServiceError>) {
        let responder = self
            .responders
            .borrow_mut()
            .pop_front()
            .expect("no listing fetch in flight");
        let _ = responder.send(result);
    }
}

impl ListingService for ScriptedListing {
    fn fetch_listing<'a>(
        &'a self,
        path: &'a DirectoryPath,
        style: ViewStyle,
    ) -> ServiceFuture<'a, Result<Listing, ServiceError>> {
        self.requests.borrow_mut().push((path.clone(), style));
        let (tx, rx) = oneshot::channel();
        self.responders.borrow_mut().push_back(tx);
        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(ServiceError::Network("cancelled".to_string())))
        })
    }
}

// =============================================================================
// Upload transport
// =============================================================================

#[derive(Clone, Debug)]
pub struct FakeFile {
    pub name: String,
    pub relative: Option<String>,
}

impl FakeFile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            relative: None,
        }
    }
}

impl UploadSource for FakeFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn relative_path(&self) -> Option<String> {
        self.relative.clone()
    }
}

struct ActiveTransfer {
    responder: oneshot::Sender<Result<(), TransferError>>,
    progress: ProgressSink,
}

/// Counts transfers torn down before they completed.
struct DropFlag<'a> {
    dropped: &'a Cell<usize>,
    done: bool,
}

impl Drop for DropFlag<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.dropped.set(self.dropped.get() + 1);
        }
    }
}

#[derive(Default)]
pub struct ScriptedTransport {
    submissions: RefCell<Vec<UploadRequest>>,
    active: RefCell<Option<ActiveTransfer>>,
    dropped: Cell<usize>,
}

impl ScriptedTransport {
    pub fn submissions(&self) -> Vec<UploadRequest> {
        self.submissions.borrow().clone()
    }

    pub fn submitted_names(&self) -> Vec<String> {
        self.submissions
            .borrow()
            .iter()
            .map(|r| r.file_name.clone())
            .collect()
    }

    /// Report progress for the most recently submitted transfer.
    pub fn progress(&self, loaded: u64, total: u64) {
        let sink = self
            .active
            .borrow()
            .as_ref()
            .map(|a| a.progress.clone())
            .expect("no transfer submitted");
        sink(loaded, total);
    }

    /// Complete the most recently submitted transfer.
    pub fn finish(&self, result: Result<(), TransferError>) {
        let active = self
            .active
            .borrow_mut()
            .take()
            .expect("no transfer submitted");
        let _ = active.responder.send(result);
    }

    /// Transfers whose future was dropped before completing.
    pub fn torn_down(&self) -> usize {
        self.dropped.get()
    }
}

impl UploadTransport<FakeFile> for ScriptedTransport {
    fn submit<'a>(
        &'a self,
        _file: FakeFile,
        request: &'a UploadRequest,
        progress: ProgressSink,
    ) -> ServiceFuture<'a, Result<(), TransferError>> {
        self.submissions.borrow_mut().push(request.clone());
        let (responder, rx) = oneshot::channel();
        *self.active.borrow_mut() = Some(ActiveTransfer {
            responder,
            progress,
        });
        let flag = DropFlag {
            dropped: &self.dropped,
            done: false,
        };
        Box::pin(async move {
            let mut flag = flag;
            let result = rx.await.unwrap_or(Err(TransferError::Aborted));
            flag.done = true;
            result
        })
    }
}

// =============================================================================
// View and notifications
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    Breadcrumbs(Vec<String>),
    /// Number of entries rendered.
    Listing(usize),
    Scroll(f64),
    UploadAdded(UploadId, String),
    UploadProgress(UploadId, u8),
    UploadRemoved(UploadId),
    Uploading(bool),
}

#[derive(Default)]
pub struct RecordingView {
    events: RefCell<Vec<ViewEvent>>,
    scroll: Cell<f64>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub fn set_scroll(&self, offset: f64) {
        self.scroll.set(offset);
    }

    pub fn removals(&self, id: UploadId) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| **e == ViewEvent::UploadRemoved(id))
            .count()
    }

    fn record(&self, event: ViewEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl ListingView for RecordingView {
    fn render_breadcrumbs(&self, crumbs: &[Breadcrumb]) {
        self.record(ViewEvent::Breadcrumbs(
            crumbs.iter().map(|c| c.label.clone()).collect(),
        ));
    }

    fn render_listing(&self, listing: &Listing) {
        self.record(ViewEvent::Listing(listing.len()));
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll.get()
    }

    fn set_scroll_offset(&self, offset: f64) {
        self.scroll.set(offset);
        self.record(ViewEvent::Scroll(offset));
    }
}

impl UploadView for RecordingView {
    fn upload_added(&self, entry: &UploadEntry) {
        self.record(ViewEvent::UploadAdded(entry.id, entry.label.clone()));
    }

    fn upload_progress(&self, id: UploadId, percent: u8) {
        self.record(ViewEvent::UploadProgress(id, percent));
    }

    fn upload_removed(&self, id: UploadId) {
        self.record(ViewEvent::UploadRemoved(id));
    }

    fn set_uploading(&self, active: bool) {
        self.record(ViewEvent::Uploading(active));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notes: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notes.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.notes.borrow().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notes.borrow_mut().push(notification);
    }
}
