//! Reload coalescing for the directory listing.
//!
//! [`ReloadCoordinator`] serializes fetch-and-render cycles with a nesting
//! suppression counter. Requests that arrive while the counter is non-zero are
//! parked in an ordered, deduplicated [`PendingReloads`] set; each time the
//! counter drops back to zero, exactly one parked path (the oldest) is
//! replayed. A running cycle holds its own suppression scope, so at most one
//! cycle is ever in flight.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};
use leptos::logging::{log, warn};

use super::error::ControllerError;
use super::services::{ListingService, ListingView, Notifier};
use crate::models::{DirectoryPath, Listing, ViewStyle};

// =============================================================================
// Pending set
// =============================================================================

/// Paths waiting for suppression to lift, oldest first, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingReloads {
    paths: VecDeque<DirectoryPath>,
}

impl PendingReloads {
    /// Queue `path` unless it is already waiting. Returns `true` if added.
    pub fn push(&mut self, path: DirectoryPath) -> bool {
        if self.paths.contains(&path) {
            return false;
        }
        self.paths.push_back(path);
        true
    }

    /// Remove and return the path parked first.
    pub fn pop_oldest(&mut self) -> Option<DirectoryPath> {
        self.paths.pop_front()
    }

    /// Number of distinct parked paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Parked paths in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &DirectoryPath> {
        self.paths.iter()
    }
}

// =============================================================================
// State
// =============================================================================

/// Outcome of asking for a reload.
#[derive(Debug, PartialEq, Eq)]
enum Admission {
    /// Counter was zero; the caller now owns one suppression level.
    Start,
    /// Parked until suppression lifts.
    Deferred,
    /// Already parked.
    Coalesced,
}

/// Everything the coordinator mutates, kept in one place.
#[derive(Debug, Default)]
struct ReloadState {
    suppression: u32,
    pending: PendingReloads,
    displayed: Option<DirectoryPath>,
    style: ViewStyle,
    listing: Option<Listing>,
}

impl ReloadState {
    fn admit(&mut self, path: &DirectoryPath) -> Admission {
        if self.suppression == 0 {
            self.suppression = 1;
            Admission::Start
        } else if self.pending.push(path.clone()) {
            Admission::Deferred
        } else {
            Admission::Coalesced
        }
    }

    /// Drop one suppression level; at zero, hand back the oldest parked path.
    fn release(&mut self) -> Option<DirectoryPath> {
        self.suppression = self.suppression.saturating_sub(1);
        if self.suppression == 0 {
            self.pending.pop_oldest()
        } else {
            None
        }
    }
}

// =============================================================================
// Coordinator
// =============================================================================

struct Inner {
    state: RefCell<ReloadState>,
    service: Rc<dyn ListingService>,
    view: Rc<dyn ListingView>,
    notifier: Rc<dyn Notifier>,
    spawner: Rc<dyn LocalSpawn>,
    root_label: String,
}

/// Serializes and coalesces refreshes of the directory listing.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ReloadCoordinator {
    inner: Rc<Inner>,
}

impl ReloadCoordinator {
    /// Creates an idle coordinator showing nothing yet.
    ///
    /// `root_label` names the root crumb of the path bar (the device name).
    pub fn new(
        service: Rc<dyn ListingService>,
        view: Rc<dyn ListingView>,
        notifier: Rc<dyn Notifier>,
        spawner: Rc<dyn LocalSpawn>,
        root_label: impl Into<String>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(ReloadState::default()),
                service,
                view,
                notifier,
                spawner,
                root_label: root_label.into(),
            }),
        }
    }

    /// Refresh the listing for `path`.
    ///
    /// Starts a fetch-render cycle right away when nothing suppresses
    /// reloads; otherwise parks `path` until suppression lifts.
    pub fn request_reload(&self, path: impl Into<DirectoryPath>) {
        let path = path.into();
        let admission = self.inner.state.borrow_mut().admit(&path);
        match admission {
            Admission::Start => self.start_cycle(path),
            Admission::Deferred | Admission::Coalesced => {}
        }
    }

    /// Reload whatever is displayed (the root before the first listing).
    pub fn refresh(&self) {
        self.request_reload(self.current_path());
    }

    /// Switch between the file and app listings.
    ///
    /// The file list reloads the displayed path; the app list always starts
    /// at the root.
    pub fn set_style(&self, style: ViewStyle) {
        let target = {
            let mut state = self.inner.state.borrow_mut();
            if state.style == style {
                return;
            }
            state.style = style;
            match style {
                ViewStyle::FileList => state.displayed.clone().unwrap_or_default(),
                ViewStyle::AppList => DirectoryPath::root(),
            }
        };
        self.request_reload(target);
    }

    /// Enter one suppression scope; reloads are parked until it ends.
    pub fn begin_suppression(&self) {
        self.inner.state.borrow_mut().suppression += 1;
    }

    /// Leave one suppression scope, replaying one parked path at zero.
    pub fn end_suppression(&self) {
        let replay = {
            let mut state = self.inner.state.borrow_mut();
            if state.suppression == 0 {
                drop(state);
                warn!("end_suppression called without a matching begin_suppression");
                return;
            }
            state.release()
        };
        if let Some(path) = replay {
            self.request_reload(path);
        }
    }

    /// Suppress reloads until the returned guard is dropped.
    pub fn suppress(&self) -> SuppressionGuard {
        self.begin_suppression();
        SuppressionGuard {
            coordinator: self.clone(),
        }
    }

    /// Displayed directory, or the root before anything was displayed.
    pub fn current_path(&self) -> DirectoryPath {
        self.inner
            .state
            .borrow()
            .displayed
            .clone()
            .unwrap_or_default()
    }

    /// Style the next cycle fetches with.
    pub fn current_style(&self) -> ViewStyle {
        self.inner.state.borrow().style
    }

    /// Last listing rendered, if any cycle has succeeded yet.
    pub fn current_listing(&self) -> Option<Listing> {
        self.inner.state.borrow().listing.clone()
    }

    /// Parked paths, oldest first.
    pub fn pending_paths(&self) -> Vec<DirectoryPath> {
        self.inner.state.borrow().pending.iter().cloned().collect()
    }

    /// Number of open suppression scopes.
    pub fn suppression_depth(&self) -> u32 {
        self.inner.state.borrow().suppression
    }

    /// Spawn one fetch-render cycle. The caller has already taken the
    /// cycle's suppression level; the guard inside the future releases it.
    fn start_cycle(&self, path: DirectoryPath) {
        let guard = SuppressionGuard {
            coordinator: self.clone(),
        };
        let this = self.clone();
        let cycle = async move {
            let _guard = guard;
            this.run_cycle(path).await;
        };

        if let Err(err) = self.inner.spawner.spawn_local(cycle) {
            warn!("failed to schedule listing reload: {err}");
        }
    }

    async fn run_cycle(&self, path: DirectoryPath) {
        let style = self.current_style();
        let scroll = self.inner.view.scroll_offset();

        match self.inner.service.fetch_listing(&path, style).await {
            Ok(listing) => self.apply_listing(path, listing, scroll),
            Err(source) => {
                let err = ControllerError::Fetch { path, source };
                log!("{err}");
                self.inner.notifier.notify(err.to_notification());
            }
        }
    }

    fn apply_listing(&self, path: DirectoryPath, listing: Listing, scroll: f64) {
        let path_changed = {
            let mut state = self.inner.state.borrow_mut();
            state.listing = Some(listing.clone());
            if state.displayed.as_ref() == Some(&path) {
                false
            } else {
                state.displayed = Some(path.clone());
                true
            }
        };

        let view = &self.inner.view;
        if path_changed {
            view.render_breadcrumbs(&path.breadcrumbs(&self.inner.root_label));
        }
        view.render_listing(&listing);
        view.set_scroll_offset(scroll);
    }
}

/// Suppression scope; releasing it may replay one parked reload.
#[must_use = "dropping the guard immediately ends the suppression scope"]
pub struct SuppressionGuard {
    coordinator: ReloadCoordinator,
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.coordinator.end_suppression();
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::LocalPool;

    use super::*;
    use crate::core::error::ServiceError;
    use crate::core::testing::{
        RecordingNotifier, RecordingView, ScriptedListing, ViewEvent, files,
    };

    struct Harness {
        pool: LocalPool,
        service: Rc<ScriptedListing>,
        view: Rc<RecordingView>,
        notifier: Rc<RecordingNotifier>,
        coordinator: ReloadCoordinator,
    }

    fn harness() -> Harness {
        let pool = LocalPool::new();
        let service = Rc::new(ScriptedListing::default());
        let view = Rc::new(RecordingView::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let coordinator = ReloadCoordinator::new(
            service.clone(),
            view.clone(),
            notifier.clone(),
            Rc::new(pool.spawner()),
            "device",
        );
        Harness {
            pool,
            service,
            view,
            notifier,
            coordinator,
        }
    }

    fn paths(list: &[&str]) -> Vec<DirectoryPath> {
        list.iter().map(|p| DirectoryPath::new(p)).collect()
    }

    #[test]
    fn test_idle_request_fetches_immediately() {
        let mut h = harness();
        h.coordinator.request_reload("/");
        assert_eq!(h.coordinator.suppression_depth(), 1);

        h.pool.run_until_stalled();
        assert_eq!(h.service.requested_paths(), paths(&["/"]));

        h.service.respond(Ok(files(&["a.txt"])));
        h.pool.run_until_stalled();

        assert_eq!(h.coordinator.suppression_depth(), 0);
        assert_eq!(h.coordinator.current_path(), DirectoryPath::root());
        assert_eq!(h.coordinator.current_listing(), Some(files(&["a.txt"])));
        assert!(h.notifier.is_empty());
    }

    #[test]
    fn test_request_during_cycle_replays_after_it() {
        let mut h = harness();
        h.coordinator.request_reload("/a/");
        h.pool.run_until_stalled();
        h.coordinator.request_reload("/b/");
        h.pool.run_until_stalled();

        assert_eq!(h.service.requested_paths(), paths(&["/a/"]));
        assert_eq!(h.coordinator.pending_paths(), paths(&["/b/"]));

        h.service.respond(Ok(files(&[])));
        h.pool.run_until_stalled();
        assert_eq!(h.service.requested_paths(), paths(&["/a/", "/b/"]));
        assert!(h.coordinator.pending_paths().is_empty());

        h.service.respond(Ok(files(&[])));
        h.pool.run_until_stalled();
        assert_eq!(h.service.requested_paths(), paths(&["/a/", "/b/"]));
        assert_eq!(h.coordinator.current_path(), DirectoryPath::new("/b/"));
        assert_eq!(h.coordinator.suppression_depth(), 0);
    }

    #[test]
    fn test_duplicate_requests_coalesce() {
        let mut h = harness();
        h.coordinator.begin_suppression();
        h.coordinator.request_reload("/docs/");
        h.coordinator.request_reload("/docs/");
        h.coordinator.request_reload("docs");
        assert_eq!(h.coordinator.pending_paths(), paths(&["/docs/"]));

        h.coordinator.end_suppression();
        h.pool.run_until_stalled();
        assert_eq!(h.service.requested_paths(), paths(&["/docs/"]));
        assert!(h.coordinator.pending_paths().is_empty());
    }

    #[test]
    fn test_nested_suppression_replays_one_path_per_release() {
        let mut h = harness();
        h.coordinator.begin_suppression();
        h.coordinator.begin_suppression();
        h.coordinator.request_reload("/a/");
        h.coordinator.request_reload("/b/");

        h.coordinator.end_suppression();
        h.pool.run_until_stalled();
        assert!(h.service.requested_paths().is_empty());

        h.coordinator.end_suppression();
        h.pool.run_until_stalled();
        assert_eq!(h.service.requested_paths(), paths(&["/a/"]));
        assert_eq!(h.coordinator.pending_paths(), paths(&["/b/"]));

        h.service.respond(Ok(files(&[])));
        h.pool.run_until_stalled();
        assert_eq!(h.service.requested_paths(), paths(&["/a/", "/b/"]));
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let mut h = harness();
        {
            let _guard = h.coordinator.suppress();
            h.coordinator.request_reload("/x/");
            h.pool.run_until_stalled();
            assert!(h.service.requested_paths().is_empty());
        }
        h.pool.run_until_stalled();
        assert_eq!(h.service.requested_paths(), paths(&["/x/"]));
    }

    #[test]
    fn test_failed_cycle_keeps_listing_and_releases() {
        let mut h = harness();
        h.coordinator.request_reload("/docs/");
        h.pool.run_until_stalled();
        h.service.respond(Ok(files(&["old.txt"])));
        h.pool.run_until_stalled();

        h.coordinator.request_reload("/other/");
        h.pool.run_until_stalled();
        h.coordinator.request_reload("/queued/");
        h.service.respond(Err(ServiceError::Http(500)));
        h.pool.run_until_stalled();

        assert_eq!(h.coordinator.current_path(), DirectoryPath::new("/docs/"));
        assert_eq!(h.coordinator.current_listing(), Some(files(&["old.txt"])));
        let notes = h.notifier.take();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].description, "Failed retrieving contents of \"/other/\"");

        // Pending reload still ran after the failure.
        assert_eq!(
            h.service.requested_paths(),
            paths(&["/docs/", "/other/", "/queued/"])
        );
        h.service.respond(Ok(files(&[])));
        h.pool.run_until_stalled();
        assert_eq!(h.coordinator.suppression_depth(), 0);
        assert_eq!(h.coordinator.current_path(), DirectoryPath::new("/queued/"));
    }

    #[test]
    fn test_breadcrumbs_only_when_path_changes() {
        let mut h = harness();
        for _ in 0..2 {
            h.coordinator.request_reload("/a/b/");
            h.pool.run_until_stalled();
            h.service.respond(Ok(files(&[])));
            h.pool.run_until_stalled();
        }

        let crumbs: Vec<_> = h
            .view
            .events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Breadcrumbs(labels) => Some(labels),
                _ => None,
            })
            .collect();
        assert_eq!(crumbs, vec![vec!["device".to_string(), "a".into(), "b".into()]]);
    }

    #[test]
    fn test_scroll_offset_restored_after_render() {
        let mut h = harness();
        h.view.set_scroll(120.0);
        h.coordinator.request_reload("/");
        h.pool.run_until_stalled();
        h.view.set_scroll(0.0);
        h.service.respond(Ok(files(&["a"])));
        h.pool.run_until_stalled();

        let events = h.view.events();
        assert!(matches!(events.last(), Some(ViewEvent::Scroll(offset)) if *offset == 120.0));
        assert!(matches!(events[events.len() - 2], ViewEvent::Listing(1)));
    }

    #[test]
    fn test_style_change_reloads() {
        let mut h = harness();
        h.coordinator.request_reload("/docs/");
        h.pool.run_until_stalled();
        h.service.respond(Ok(files(&[])));
        h.pool.run_until_stalled();

        h.coordinator.set_style(ViewStyle::FileList);
        h.pool.run_until_stalled();
        assert_eq!(h.service.requests().len(), 1);

        h.coordinator.set_style(ViewStyle::AppList);
        h.pool.run_until_stalled();
        assert_eq!(
            h.service.requests().last(),
            Some(&(DirectoryPath::root(), ViewStyle::AppList))
        );
        h.service.respond(Ok(Listing::Apps(Vec::new())));
        h.pool.run_until_stalled();

        h.coordinator.set_style(ViewStyle::FileList);
        h.pool.run_until_stalled();
        assert_eq!(
            h.service.requests().last(),
            Some(&(DirectoryPath::root(), ViewStyle::FileList))
        );
    }

    #[test]
    fn test_unbalanced_end_is_ignored() {
        let mut h = harness();
        h.coordinator.end_suppression();
        assert_eq!(h.coordinator.suppression_depth(), 0);
        h.coordinator.request_reload("/");
        h.pool.run_until_stalled();
        assert_eq!(h.service.requests().len(), 1);
    }

    #[test]
    fn test_dropped_cycle_releases_suppression() {
        let h = harness();
        let Harness {
            mut pool,
            coordinator,
            service,
            ..
        } = h;
        coordinator.request_reload("/a/");
        pool.run_until_stalled();
        coordinator.request_reload("/b/");
        drop(pool);

        // Tearing down the executor drops the in-flight cycle and the replay of /b/.
        assert_eq!(coordinator.suppression_depth(), 0);
        assert!(coordinator.pending_paths().is_empty());
        assert_eq!(service.requests().len(), 1);
    }

    #[test]
    fn test_pending_set_order_and_dedup() {
        let mut pending = PendingReloads::default();
        assert!(pending.push(DirectoryPath::new("/a/")));
        assert!(pending.push(DirectoryPath::new("/b/")));
        assert!(!pending.push(DirectoryPath::new("/a/")));
        assert_eq!(pending.len(), 2);
        assert_eq!(pending.pop_oldest(), Some(DirectoryPath::new("/a/")));
        assert_eq!(pending.pop_oldest(), Some(DirectoryPath::new("/b/")));
        assert!(pending.is_empty());
    }
}
