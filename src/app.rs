//! Root application module.
//!
//! Contains the main App component, the [`AppContext`] every component reads,
//! and [`SignalView`], which renders controller output into Leptos signals.

use std::cell::Cell;
use std::rc::Rc;

use leptos::logging::log;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::Uploader;
use crate::config::MAX_ALERTS;
use crate::core::error::{ControllerError, ServiceError};
use crate::core::services::{InstallService, ListingView, Notifier, UploadView};
use crate::core::{ReloadCoordinator, UploadQueue};
use crate::models::{
    AppEntry, Breadcrumb, DirectoryPath, FileEntry, InstallRequest, Listing, Notification,
    UploadEntry, UploadId, ViewStyle,
};
use crate::utils::{
    BrowserSpawner, HttpInstallService, HttpListingService, PickedFile, UrlValidation,
    XhrUploadTransport, dom, download_url, validate_redirect_url,
};

// ============================================================================
// ExplorerState
// ============================================================================

/// An alert on screen, keyed for dismissal.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub notification: Notification,
}

/// Entry whose details modal is open.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    File(FileEntry),
    App(AppEntry),
}

/// Everything the widget renders, as Leptos signals.
///
/// `Copy` because signals are arena handles.
#[derive(Clone, Copy)]
pub struct ExplorerState {
    /// Path bar of the displayed directory.
    pub breadcrumbs: RwSignal<Vec<Breadcrumb>>,
    /// Last rendered listing (`None` until the first fetch completes).
    pub listing: RwSignal<Option<Listing>>,
    /// Style selected in the toolbar.
    pub style: RwSignal<ViewStyle>,
    /// Upload rows in arrival order.
    pub uploads: RwSignal<Vec<UploadEntry>>,
    /// Whether the upload worker is running.
    pub uploading: RwSignal<bool>,
    /// Alerts, newest first (bounded by `MAX_ALERTS`).
    pub alerts: RwSignal<Vec<Alert>>,
    pub selection: RwSignal<Option<Selection>>,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self {
            breadcrumbs: RwSignal::new(Vec::new()),
            listing: RwSignal::new(None),
            style: RwSignal::new(ViewStyle::default()),
            uploads: RwSignal::new(Vec::new()),
            uploading: RwSignal::new(false),
            alerts: RwSignal::new(Vec::new()),
            selection: RwSignal::new(None),
        }
    }

    pub fn push_alert(&self, id: u64, notification: Notification) {
        self.alerts.update(|alerts| {
            alerts.insert(0, Alert { id, notification });
            alerts.truncate(MAX_ALERTS);
        });
    }

    pub fn dismiss_alert(&self, id: u64) {
        self.alerts.update(|alerts| alerts.retain(|alert| alert.id != id));
    }

    pub fn select(&self, selection: Selection) {
        self.selection.set(Some(selection));
    }

    pub fn clear_selection(&self) {
        self.selection.set(None);
    }
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SignalView
// ============================================================================

/// Controller view and notifier backed by [`ExplorerState`].
pub struct SignalView {
    state: ExplorerState,
    next_alert: Cell<u64>,
}

impl SignalView {
    pub fn new(state: ExplorerState) -> Self {
        Self {
            state,
            next_alert: Cell::new(0),
        }
    }
}

impl ListingView for SignalView {
    fn render_breadcrumbs(&self, crumbs: &[Breadcrumb]) {
        self.state.breadcrumbs.set(crumbs.to_vec());
    }

    fn render_listing(&self, listing: &Listing) {
        self.state.listing.set(Some(listing.clone()));
    }

    fn scroll_offset(&self) -> f64 {
        dom::scroll_offset()
    }

    fn set_scroll_offset(&self, offset: f64) {
        // The new rows are patched in on the next frame.
        request_animation_frame(move || dom::set_scroll_offset(offset));
    }
}

impl UploadView for SignalView {
    fn upload_added(&self, entry: &UploadEntry) {
        self.state.uploads.update(|uploads| uploads.push(entry.clone()));
    }

    fn upload_progress(&self, id: UploadId, percent: u8) {
        self.state.uploads.update(|uploads| {
            if let Some(entry) = uploads.iter_mut().find(|entry| entry.id == id) {
                entry.progress = percent;
            }
        });
    }

    fn upload_removed(&self, id: UploadId) {
        self.state
            .uploads
            .update(|uploads| uploads.retain(|entry| entry.id != id));
    }

    fn set_uploading(&self, active: bool) {
        self.state.uploading.set(active);
    }
}

impl Notifier for SignalView {
    fn notify(&self, notification: Notification) {
        let id = self.next_alert.get();
        self.next_alert.set(id + 1);
        self.state.push_alert(id, notification);
    }
}

// ============================================================================
// Controller
// ============================================================================

/// The browser-wired controller: coordinator and upload queue.
#[derive(Clone)]
pub struct Controller {
    reload: ReloadCoordinator,
    uploads: UploadQueue<PickedFile>,
    view: Rc<SignalView>,
}

impl Controller {
    fn new(state: ExplorerState) -> Self {
        let view = Rc::new(SignalView::new(state));
        let spawner = Rc::new(BrowserSpawner);
        let reload = ReloadCoordinator::new(
            Rc::new(HttpListingService),
            view.clone(),
            view.clone(),
            spawner.clone(),
            dom::device_name(),
        );
        let uploads = UploadQueue::new(
            Rc::new(XhrUploadTransport),
            view.clone(),
            view.clone(),
            reload.clone(),
            spawner,
        );
        Self {
            reload,
            uploads,
            view,
        }
    }

    fn upload(&self, files: Vec<PickedFile>) {
        let target = self.reload.current_path();
        for file in files {
            self.uploads.enqueue(file, target.clone());
        }
    }

    fn cancel_upload(&self, id: UploadId) {
        if let Some(handle) = self.uploads.handle(id) {
            self.uploads.cancel(&handle);
        }
    }

    fn install(&self, request: InstallRequest) {
        let notifier = self.view.clone();
        spawn_local(async move {
            let result = HttpInstallService.request_install(&request).await;
            match redirect_target(result) {
                Ok(url) => dom::navigate(&url),
                Err(source) => {
                    let err = ControllerError::Install {
                        path: request.path,
                        source,
                    };
                    log!("{err}");
                    notifier.notify(err.to_notification());
                }
            }
        });
    }
}

/// Accept an install response only if its redirect is safe to follow.
fn redirect_target(response: Result<String, ServiceError>) -> Result<String, ServiceError> {
    match validate_redirect_url(&response?) {
        UrlValidation::Valid(url) => Ok(url),
        UrlValidation::Invalid(err) => Err(ServiceError::Decode(err.to_string())),
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Global application context shared via Leptos context.
///
/// Holds the rendered state and the controller driving it. The controller
/// is `!Send`, so it lives in local storage.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub explorer: ExplorerState,
    controller: StoredValue<Controller, LocalStorage>,
}

impl AppContext {
    pub fn new() -> Self {
        let explorer = ExplorerState::new();
        Self {
            explorer,
            controller: StoredValue::new_local(Controller::new(explorer)),
        }
    }

    fn controller(&self) -> Controller {
        self.controller.get_value()
    }

    /// Show the listing of `path`.
    pub fn open(&self, path: impl Into<DirectoryPath>) {
        self.controller().reload.request_reload(path);
    }

    pub fn refresh(&self) {
        self.controller().reload.refresh();
    }

    pub fn set_style(&self, style: ViewStyle) {
        self.explorer.style.set(style);
        self.controller().reload.set_style(style);
    }

    /// Queue files for upload into the displayed directory.
    pub fn upload(&self, files: Vec<PickedFile>) {
        if files.is_empty() || !self.explorer.style.get_untracked().allows_upload() {
            return;
        }
        self.controller().upload(files);
    }

    pub fn cancel_upload(&self, id: UploadId) {
        self.controller().cancel_upload(id);
    }

    /// Ask the server to install a bundle and follow its redirect.
    pub fn install(&self, request: InstallRequest) {
        self.explorer.clear_selection();
        self.controller().install(request);
    }

    pub fn download(&self, path: &str) {
        self.explorer.clear_selection();
        dom::navigate(&download_url(path));
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component.
///
/// Creates and provides the [`AppContext`], then loads the root listing.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);
    ctx.open(DirectoryPath::root());

    view! { <Uploader /> }
}
