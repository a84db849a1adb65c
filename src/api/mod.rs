//! Client side of the code-improvement backend
//!
//! Three JSON endpoints drive the viewer (`/chatv1`, `/get_file_changes`,
//! `/accept_changes`); `/pending_changes` backs the `--pending` listing.

mod client;
mod error;
mod types;

pub use client::{Backend, HttpBackend};
pub use error::{ApiError, ApiResult};
pub use types::{
    AcceptOutcome, AcceptRequest, Changes, FileChangeMap, FileChangeRecord, GeneratedTests,
    ImproveRequest, ImprovementResult, PendingChange, Plan, SuggestedFix, TestAnalysis,
    TestResults, IMPROVE_FIELDS_REQUIRED,
};
