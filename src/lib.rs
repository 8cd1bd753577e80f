pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod operations;
pub mod path;
pub mod store;
pub mod types;

pub use client::PanelClient;
pub use config::PanelConfig;
pub use controller::{
    DismissHandler, LocalUpdate, RenameSubmissionController, SubmissionOutcome, SubmissionState,
};
pub use error::{PanelError, Result};
pub use form::RenameForm;
pub use operations::FileOperations;
pub use path::{PathResolver, ResolvedPaths};
pub use store::{DirectoryStore, MemoryDirectoryStore};
pub use types::{FileEntry, OperationClassification, OperationMode, RenameRequest};
