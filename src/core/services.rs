//! Collaborator contracts consumed by the controller.
//!
//! The reload coordinator and the upload queue never talk to the network or
//! the DOM directly. Server adapters implement the `*Service`/`*Transport`
//! traits, and the rendering layer implements the `*View` traits and
//! [`Notifier`].

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use super::error::{ServiceError, TransferError};
use crate::models::{
    Breadcrumb, DirectoryPath, InstallRequest, Listing, Notification, UploadEntry, UploadId,
    UploadRequest, ViewStyle,
};

/// Object-safe boxed future returned by collaborator methods.
///
/// Futures are `!Send`: everything runs on the browser event loop.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Receives `(loaded, total)` byte counts while a transfer is in flight.
pub type ProgressSink = Rc<dyn Fn(u64, u64)>;

/// Retrieves directory listings (`GET list`).
pub trait ListingService {
    fn fetch_listing<'a>(
        &'a self,
        path: &'a DirectoryPath,
        style: ViewStyle,
    ) -> ServiceFuture<'a, Result<Listing, ServiceError>>;
}

/// Sends one file to the server (`POST upload`).
///
/// Dropping the returned future must abort the transfer.
pub trait UploadTransport<F> {
    fn submit<'a>(
        &'a self,
        file: F,
        request: &'a UploadRequest,
        progress: ProgressSink,
    ) -> ServiceFuture<'a, Result<(), TransferError>>;
}

/// Asks the server to install a bundle (`POST install`), yielding the
/// redirect target.
pub trait InstallService {
    fn request_install<'a>(
        &'a self,
        request: &'a InstallRequest,
    ) -> ServiceFuture<'a, Result<String, ServiceError>>;
}

/// A file accepted for upload.
pub trait UploadSource {
    fn file_name(&self) -> String;

    /// Folder structure the file was dropped with, if any.
    fn relative_path(&self) -> Option<String> {
        None
    }
}

/// Rendering of the directory listing area.
pub trait ListingView {
    fn render_breadcrumbs(&self, crumbs: &[Breadcrumb]);

    fn render_listing(&self, listing: &Listing);

    fn scroll_offset(&self) -> f64;

    fn set_scroll_offset(&self, offset: f64);
}

/// Rendering of the in-flight upload rows.
pub trait UploadView {
    fn upload_added(&self, entry: &UploadEntry);

    fn upload_progress(&self, id: UploadId, percent: u8);

    fn upload_removed(&self, id: UploadId);

    /// Whether the submission worker is currently draining the queue.
    fn set_uploading(&self, active: bool);
}

/// Sink for user-visible alerts.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}
