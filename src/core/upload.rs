//! Sequential upload queue with per-task cancellation.
//!
//! Any number of files can be queued at once and each gets its own
//! [`UploadHandle`], but a single worker submits them one at a time in
//! arrival order. In-flight transfers are wrapped in [`Abortable`] so a
//! cancel drops the transport future, which aborts the request.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

use futures::future::{AbortHandle, Abortable, Aborted};
use futures::task::{LocalSpawn, LocalSpawnExt};
use leptos::logging::{log, warn};

use super::error::{ControllerError, ServiceError, TransferError};
use super::reload::ReloadCoordinator;
use super::services::{Notifier, ProgressSink, UploadSource, UploadTransport, UploadView};
use crate::models::{
    DirectoryPath, UploadEntry, UploadId, UploadRequest, UploadStatus, progress_percent,
};

/// How a task left the queue.
enum Outcome {
    Succeeded,
    Failed(ServiceError),
    Aborted,
}

struct UploadTask {
    request: UploadRequest,
    progress: u8,
    status: UploadStatus,
    abort: Option<AbortHandle>,
}

struct QueueState<F> {
    next_id: u64,
    /// Visible tasks: everything not yet terminal.
    tasks: BTreeMap<UploadId, UploadTask>,
    /// Files awaiting submission, in arrival order.
    waiting: VecDeque<(UploadId, F)>,
    worker_active: bool,
}

impl<F> Default for QueueState<F> {
    fn default() -> Self {
        Self {
            next_id: 0,
            tasks: BTreeMap::new(),
            waiting: VecDeque::new(),
            worker_active: false,
        }
    }
}

struct QueueInner<F> {
    state: RefCell<QueueState<F>>,
    transport: Rc<dyn UploadTransport<F>>,
    view: Rc<dyn UploadView>,
    notifier: Rc<dyn Notifier>,
    reload: ReloadCoordinator,
    spawner: Rc<dyn LocalSpawn>,
}

/// Tracks uploads from acceptance to their terminal state.
pub struct UploadQueue<F> {
    inner: Rc<QueueInner<F>>,
}

impl<F> Clone for UploadQueue<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F: UploadSource + 'static> UploadQueue<F> {
    pub fn new(
        transport: Rc<dyn UploadTransport<F>>,
        view: Rc<dyn UploadView>,
        notifier: Rc<dyn Notifier>,
        reload: ReloadCoordinator,
        spawner: Rc<dyn LocalSpawn>,
    ) -> Self {
        Self {
            inner: Rc::new(QueueInner {
                state: RefCell::new(QueueState::default()),
                transport,
                view,
                notifier,
                reload,
                spawner,
            }),
        }
    }

    /// Accept `file` for upload into `target`.
    ///
    /// The task is rendered right away and submitted once every earlier
    /// task has finished.
    pub fn enqueue(&self, file: F, target: DirectoryPath) -> UploadHandle {
        let request = UploadRequest {
            relative_path: file.relative_path().unwrap_or_default(),
            file_name: file.file_name(),
            path: target,
        };
        let label = format!("{}{}", request.path, request.file_name);

        let (id, start_worker) = {
            let mut state = self.inner.state.borrow_mut();
            let id = UploadId(state.next_id);
            state.next_id += 1;
            state.tasks.insert(
                id,
                UploadTask {
                    request,
                    progress: 0,
                    status: UploadStatus::Pending,
                    abort: None,
                },
            );
            state.waiting.push_back((id, file));
            let start_worker = !state.worker_active;
            state.worker_active = true;
            (id, start_worker)
        };

        self.inner.view.upload_added(&UploadEntry {
            id,
            label,
            progress: 0,
        });
        if start_worker {
            self.spawn_worker();
        }

        self.handle_for(id)
    }

    /// Abort the task behind `handle`, whether queued or in flight.
    pub fn cancel(&self, handle: &UploadHandle) {
        self.inner.cancel(handle.id);
    }

    /// Handle for a visible task; `None` once it has finished.
    pub fn handle(&self, id: UploadId) -> Option<UploadHandle> {
        let visible = self.inner.state.borrow().tasks.contains_key(&id);
        visible.then(|| self.handle_for(id))
    }

    /// Status of a visible task; `None` once it reached a terminal state.
    pub fn status(&self, id: UploadId) -> Option<UploadStatus> {
        self.inner.state.borrow().tasks.get(&id).map(|t| t.status)
    }

    /// Visible tasks with their current progress, oldest first.
    pub fn entries(&self) -> Vec<UploadEntry> {
        self.inner
            .state
            .borrow()
            .tasks
            .iter()
            .map(|(id, task)| UploadEntry {
                id: *id,
                label: format!("{}{}", task.request.path, task.request.file_name),
                progress: task.progress,
            })
            .collect()
    }

    /// Number of visible tasks.
    pub fn len(&self) -> usize {
        self.inner.state.borrow().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the worker is running.
    pub fn is_uploading(&self) -> bool {
        self.inner.state.borrow().worker_active
    }

    fn handle_for(&self, id: UploadId) -> UploadHandle {
        let queue: Weak<QueueInner<F>> = Rc::downgrade(&self.inner);
        let queue: Weak<dyn CancelUpload> = queue;
        UploadHandle { id, queue }
    }

    fn spawn_worker(&self) {
        self.inner.view.set_uploading(true);
        let guard = WorkerGuard {
            queue: Rc::clone(&self.inner),
        };
        let queue = Rc::clone(&self.inner);
        let worker = async move {
            let _worker = guard;
            queue.drain().await;
        };
        // A rejected worker is dropped here and its guard aborts the task.
        if let Err(err) = self.inner.spawner.spawn_local(worker) {
            warn!("failed to schedule uploads: {err}");
        }
    }
}

impl<F: UploadSource + 'static> QueueInner<F> {
    async fn drain(self: Rc<Self>) {
        loop {
            let next = self.state.borrow_mut().waiting.pop_front();
            let Some((id, file)) = next else {
                break;
            };
            Rc::clone(&self).transfer(id, file).await;
        }
    }

    async fn transfer(self: Rc<Self>, id: UploadId, file: F) {
        let (abort, registration) = AbortHandle::new_pair();
        let request = {
            let mut state = self.state.borrow_mut();
            match state.tasks.get_mut(&id) {
                Some(task) if task.status == UploadStatus::Pending => {
                    task.status = UploadStatus::InFlight;
                    task.abort = Some(abort);
                    task.request.clone()
                }
                // Cancelled while queued; already cleaned up.
                _ => return,
            }
        };

        let mut terminal = TerminalGuard {
            queue: Rc::clone(&self),
            id,
            outcome: None,
        };
        let progress = self.progress_sink(id);
        let transfer = self.transport.submit(file, &request, progress);
        let outcome = match Abortable::new(transfer, registration).await {
            Ok(Ok(())) => Outcome::Succeeded,
            Ok(Err(TransferError::Failed(source))) => Outcome::Failed(source),
            Ok(Err(TransferError::Aborted)) | Err(Aborted) => Outcome::Aborted,
        };
        terminal.outcome = Some(outcome);
    }

    fn progress_sink(self: &Rc<Self>, id: UploadId) -> ProgressSink {
        let queue = Rc::downgrade(self);
        Rc::new(move |loaded: u64, total: u64| {
            let Some(queue) = queue.upgrade() else {
                return;
            };
            let percent = progress_percent(loaded, total);
            let changed = {
                let mut state = queue.state.borrow_mut();
                match state.tasks.get_mut(&id) {
                    Some(task)
                        if task.status == UploadStatus::InFlight && task.progress != percent =>
                    {
                        task.progress = percent;
                        true
                    }
                    _ => false,
                }
            };
            if changed {
                queue.view.upload_progress(id, percent);
            }
        })
    }

    /// Remove a task and react to how it ended. Runs at most once per task.
    fn finish(&self, id: UploadId, outcome: Outcome) {
        let task = self.state.borrow_mut().tasks.remove(&id);
        let Some(task) = task else {
            return;
        };
        self.view.upload_removed(id);

        match outcome {
            Outcome::Succeeded => self.reload.request_reload(self.reload.current_path()),
            Outcome::Failed(source) => {
                let err = ControllerError::Upload {
                    file: task.request.file_name,
                    path: task.request.path,
                    source,
                };
                log!("{err}");
                self.notifier.notify(err.to_notification());
            }
            Outcome::Aborted => {}
        }
    }
}

/// Type-erased cancellation so handles don't carry the file type.
trait CancelUpload {
    fn cancel(&self, id: UploadId);
}

enum CancelAction {
    Dequeued,
    Abort(AbortHandle),
    Nothing,
}

impl<F: UploadSource + 'static> CancelUpload for QueueInner<F> {
    fn cancel(&self, id: UploadId) {
        let action = {
            let mut state = self.state.borrow_mut();
            let QueueState { tasks, waiting, .. } = &mut *state;
            match tasks.get(&id) {
                Some(task) if task.status == UploadStatus::Pending => {
                    waiting.retain(|(queued, _)| *queued != id);
                    CancelAction::Dequeued
                }
                Some(task) => task
                    .abort
                    .clone()
                    .map_or(CancelAction::Nothing, CancelAction::Abort),
                None => CancelAction::Nothing,
            }
        };

        match action {
            CancelAction::Dequeued => self.finish(id, Outcome::Aborted),
            CancelAction::Abort(handle) => handle.abort(),
            CancelAction::Nothing => {}
        }
    }
}

/// Opaque token for one upload, returned by [`UploadQueue::enqueue`].
#[derive(Clone)]
pub struct UploadHandle {
    id: UploadId,
    queue: Weak<dyn CancelUpload>,
}

impl UploadHandle {
    pub fn id(&self) -> UploadId {
        self.id
    }

    /// Abort this upload. No-op once it has finished.
    pub fn cancel(&self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.cancel(self.id);
        }
    }
}

impl std::fmt::Debug for UploadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadHandle").field("id", &self.id).finish()
    }
}

/// Finishes the task even if the transfer future is torn down mid-flight.
struct TerminalGuard<F: UploadSource + 'static> {
    queue: Rc<QueueInner<F>>,
    id: UploadId,
    outcome: Option<Outcome>,
}

impl<F: UploadSource + 'static> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        let outcome = self.outcome.take().unwrap_or(Outcome::Aborted);
        self.queue.finish(self.id, outcome);
    }
}

/// Marks the worker idle when it stops; leftovers count as aborted.
struct WorkerGuard<F: UploadSource + 'static> {
    queue: Rc<QueueInner<F>>,
}

impl<F: UploadSource + 'static> Drop for WorkerGuard<F> {
    fn drop(&mut self) {
        let leftovers: Vec<UploadId> = {
            let mut state = self.queue.state.borrow_mut();
            state.worker_active = false;
            state.waiting.drain(..).map(|(id, _)| id).collect()
        };
        for id in leftovers {
            self.queue.finish(id, Outcome::Aborted);
        }
        self.queue.view.set_uploading(false);
    }
}
