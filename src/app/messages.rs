use crate::api::{AcceptOutcome, ApiResult, FileChangeMap, ImprovementResult};
use crate::store::FetchTicket;

/// Messages from background tasks to the main UI thread
pub enum BackgroundMessage {
    /// `/chatv1` finished; errors are already user-facing text
    ImproveComplete(Result<ImprovementResult, String>),
    /// `/get_file_changes` finished for the ticket's change id
    FileChangesLoaded {
        ticket: FetchTicket,
        result: Result<FileChangeMap, String>,
    },
    /// `/accept_changes` finished
    AcceptComplete(ApiResult<AcceptOutcome>),
}
