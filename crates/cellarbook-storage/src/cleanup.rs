//! Best-effort removal used while unwinding failed ingestions and when
//! reaping asset pairs.

use std::path::Path;

use crate::traits::AssetStore;

/// What a best-effort removal did. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    Absent,
    Failed,
}

/// Remove `path`, logging instead of returning any failure.
pub async fn remove_best_effort(store: &dyn AssetStore, path: &Path) -> CleanupOutcome {
    match store.remove(path).await {
        Ok(true) => CleanupOutcome::Removed,
        Ok(false) => {
            tracing::debug!(path = %path.display(), "Nothing to remove");
            CleanupOutcome::Absent
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to remove asset file"
            );
            CleanupOutcome::Failed
        }
    }
}
