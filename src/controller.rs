use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{error, info};

use crate::{
    error::{PanelError, Result},
    form::RenameForm,
    operations::FileOperations,
    path::{PathResolver, ResolvedPaths},
    store::DirectoryStore,
    types::{FileEntry, OperationClassification, OperationMode, RenameRequest},
};

/// Called once after each successful submission to close the form
pub type DismissHandler = Box<dyn Fn() + Send + Sync>;

/// Where a submission currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    /// Last submission was rejected. The form is interactive again.
    Failed { message: String },
}

/// Change applied to the local listing after the server confirmed a rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalUpdate {
    /// Entry stays in this directory under its new name
    InPlace { key: String, entry: FileEntry },
    /// Entry left this directory
    Remove { id: String },
    /// Moved entry without an identifier. It stays listed under its old name.
    // TODO: refresh the listing instead once id-less entries can be matched
    // by path after a move.
    Unchanged,
}

impl LocalUpdate {
    /// Decide how the listing changes for `file` renamed to `target_name`
    pub fn plan(file: &FileEntry, target_name: &str, resolved: &ResolvedPaths) -> Self {
        match resolved.classification {
            OperationClassification::Rename => LocalUpdate::InPlace {
                key: file.key().to_string(),
                entry: FileEntry {
                    name: target_name.to_string(),
                    ..file.clone()
                },
            },
            OperationClassification::Move if file.has_identifier() => LocalUpdate::Remove {
                id: file.uuid.clone(),
            },
            OperationClassification::Move => LocalUpdate::Unchanged,
        }
    }
}

/// Holds a submission in `Submitting` until it is finished. Dropping it
/// unfinished (the submit future was dropped mid-request) leaves the form in
/// `Failed` so it can be submitted again.
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(mut self, next: SubmissionState) {
        self.finished = true;
        *lock(self.state) = next;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *lock(self.state) = SubmissionState::Failed {
                message: "submission cancelled".to_string(),
            };
        }
    }
}

fn lock(state: &Mutex<SubmissionState>) -> MutexGuard<'_, SubmissionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub request: RenameRequest,
    pub classification: OperationClassification,
    pub update: LocalUpdate,
}

/// Drives one rename/move form from submit to dismissal
///
/// Only one submission may be in flight. Once issued, a request runs to
/// completion; there is no cancellation and no retry.
pub struct RenameSubmissionController {
    operations: Arc<dyn FileOperations>,
    store: Arc<dyn DirectoryStore>,
    server: String,
    file: FileEntry,
    form: RenameForm,
    on_dismissed: DismissHandler,
    state: Mutex<SubmissionState>,
}

impl RenameSubmissionController {
    pub fn new(
        operations: Arc<dyn FileOperations>,
        store: Arc<dyn DirectoryStore>,
        server: impl Into<String>,
        file: FileEntry,
        mode: OperationMode,
        on_dismissed: DismissHandler,
    ) -> Self {
        let form = RenameForm::new(&file, mode);
        Self {
            operations,
            store,
            server: server.into(),
            file,
            form,
            on_dismissed,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn form(&self) -> &RenameForm {
        &self.form
    }

    pub fn file(&self) -> &FileEntry {
        &self.file
    }

    pub fn state(&self) -> SubmissionState {
        lock(&self.state).clone()
    }

    /// Whether the form can be dismissed. False while a request is in flight.
    pub fn is_dismissable(&self) -> bool {
        !matches!(*lock(&self.state), SubmissionState::Submitting)
    }

    /// Whether the spinner overlay is shown
    pub fn shows_spinner(&self) -> bool {
        !self.is_dismissable()
    }

    /// Resolve `target_name` against the current directory without submitting
    pub async fn preview(&self, target_name: &str) -> ResolvedPaths {
        let directory = self.store.current_directory().await;
        PathResolver::resolve(&directory, &self.file.name, target_name, self.form.mode())
    }

    /// Submit the form with `target_name` as the new name
    pub async fn submit(&self, target_name: &str) -> Result<SubmissionOutcome> {
        let in_flight = {
            let mut state = lock(&self.state);
            if *state == SubmissionState::Submitting {
                return Err(PanelError::SubmissionInProgress);
            }
            *state = SubmissionState::Submitting;
            InFlight {
                state: &self.state,
                finished: false,
            }
        };

        let resolved = self.preview(target_name).await;
        let request = resolved.request();

        if let Err(e) = self.operations.rename_file(&self.server, &request).await {
            error!(
                "Failed to rename {} to {} via {}: {}",
                request.rename_from,
                request.rename_to,
                self.operations.identifier(),
                e
            );
            in_flight.finish(SubmissionState::Failed {
                message: e.to_string(),
            });
            return Err(PanelError::submission_failed(e));
        }

        let update = LocalUpdate::plan(&self.file, target_name, &resolved);
        match &update {
            LocalUpdate::InPlace { key, entry } => {
                self.store.replace(key, entry.clone()).await;
            }
            LocalUpdate::Remove { id } => self.store.remove_by_id(id).await,
            LocalUpdate::Unchanged => {}
        }

        info!(
            "{:?} {} -> {}",
            resolved.classification, request.rename_from, request.rename_to
        );

        in_flight.finish(SubmissionState::Idle);
        (self.on_dismissed)();

        Ok(SubmissionOutcome {
            request,
            classification: resolved.classification,
            update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDirectoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockOperations {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FileOperations for MockOperations {
        async fn rename_file(&self, _server: &str, _request: &RenameRequest) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(PanelError::Api {
                    status: 500,
                    message: "boom".to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn identifier(&self) -> String {
            "mock".to_string()
        }
    }

    fn controller(
        fail: bool,
        file: FileEntry,
        mode: OperationMode,
    ) -> (RenameSubmissionController, MemoryDirectoryStore, Arc<AtomicUsize>) {
        let store = MemoryDirectoryStore::new("/home", vec![file.clone()]);
        let dismissed = Arc::new(AtomicUsize::new(0));
        let counter = dismissed.clone();
        let controller = RenameSubmissionController::new(
            Arc::new(MockOperations {
                fail,
                calls: AtomicUsize::new(0),
            }),
            Arc::new(store.clone()),
            "srv",
            file,
            mode,
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        (controller, store, dismissed)
    }

    #[test]
    fn test_plan_rules() {
        let with_id = FileEntry::new("1", "a.txt");
        let without_id = FileEntry::new("", "plugins");

        let rename = PathResolver::resolve("/", "a.txt", "b.txt", OperationMode::Rename);
        assert_eq!(
            LocalUpdate::plan(&with_id, "b.txt", &rename),
            LocalUpdate::InPlace {
                key: "1".to_string(),
                entry: FileEntry::new("1", "b.txt"),
            }
        );

        let moved = PathResolver::resolve("/", "a.txt", "sub/b.txt", OperationMode::Rename);
        assert_eq!(
            LocalUpdate::plan(&with_id, "sub/b.txt", &moved),
            LocalUpdate::Remove { id: "1".to_string() }
        );
        assert_eq!(
            LocalUpdate::plan(&without_id, "sub/b.txt", &moved),
            LocalUpdate::Unchanged
        );
    }

    #[tokio::test]
    async fn test_successful_rename() {
        let (controller, store, dismissed) =
            controller(false, FileEntry::new("1", "a.txt"), OperationMode::Rename);

        let outcome = controller.submit("b.txt").await.unwrap();

        assert_eq!(outcome.request.rename_from, "/home/a.txt");
        assert_eq!(outcome.request.rename_to, "/home/b.txt");
        assert_eq!(store.get("1").await.unwrap().name, "b.txt");
        assert_eq!(dismissed.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_failure_keeps_listing() {
        let (controller, store, dismissed) =
            controller(true, FileEntry::new("1", "a.txt"), OperationMode::Rename);

        let result = controller.submit("b.txt").await;

        assert!(matches!(result, Err(PanelError::SubmissionFailed { .. })));
        assert_eq!(store.get("1").await.unwrap().name, "a.txt");
        assert_eq!(dismissed.load(Ordering::SeqCst), 0);
        assert!(controller.is_dismissable());
        assert!(!controller.shows_spinner());
        assert!(matches!(
            controller.state(),
            SubmissionState::Failed { .. }
        ));
    }
}
