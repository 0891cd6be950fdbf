use std::sync::Arc;

use coachdb_core::{ChangeReport, detect_changes};
use coachdb_storage::SnapshotStore;

use crate::ServiceError;

/// Year-over-year staff diffs. Computed on every call, never cached.
pub struct ChangeService {
    snapshots: Arc<dyn SnapshotStore>,
}

impl ChangeService {
    #[must_use]
    pub fn new(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self { snapshots }
    }

    /// Diff the `from` season against the `to` season.
    ///
    /// A season with no rows is an empty snapshot, not an error.
    pub async fn diff(&self, from: i32, to: i32) -> Result<ChangeReport, ServiceError> {
        let (prev, cur) =
            tokio::try_join!(self.snapshots.load_snapshot(from), self.snapshots.load_snapshot(to))?;
        let changes = detect_changes(&prev, &cur);

        if !changes.data_quality.is_clean() {
            tracing::warn!(
                from,
                to,
                malformed = changes.data_quality.malformed,
                duplicates = changes.data_quality.duplicates,
                "Snapshot data quality issues while diffing"
            );
        }
        tracing::debug!(
            from,
            to,
            new_hires = changes.new_hires.len(),
            departures = changes.departures.len(),
            promotions = changes.promotions.len(),
            moves = changes.moves.len(),
            "Computed change report"
        );
        Ok(ChangeReport::new(from, to, changes))
    }
}
