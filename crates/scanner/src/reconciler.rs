//! Catalog reconciliation against the storage tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Mutex;
use vfe_core::storage_layout::{normalize_root, recording_key};
use vfe_db::models::recording::CreateRecording;
use vfe_db::repositories::{PlayerRepo, RecordingRepo, TeamRepo};
use vfe_db::DbPool;

use crate::error::ScanError;
use crate::walk::walk_storage;

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub teams_created: usize,
    pub players_created: usize,
    pub recordings_created: usize,
    pub recordings_removed: usize,
    /// Video files ignored because they sit outside the expected layout.
    pub skipped: usize,
}

impl ScanReport {
    /// Whether the pass wrote anything to the catalog.
    pub fn changed(&self) -> bool {
        self.teams_created > 0
            || self.players_created > 0
            || self.recordings_created > 0
            || self.recordings_removed > 0
    }
}

/// Makes the catalog's recording set equal to the qualifying files on disk.
///
/// One instance is shared (behind an `Arc`) by startup, the admin re-scan
/// endpoint, and the periodic background task. Passes are serialized by an
/// internal mutex.
pub struct Reconciler {
    pool: DbPool,
    root: PathBuf,
    root_key: String,
    guard: Mutex<()>,
}

impl Reconciler {
    pub fn new(pool: DbPool, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root_key = normalize_root(&root);
        Self {
            pool,
            root,
            root_key,
            guard: Mutex::new(()),
        }
    }

    /// The storage root as configured.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The normalized root prefix used in every recording path.
    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    /// Run one reconciliation pass.
    ///
    /// 1. Walk the tree once and collect every well-placed video file.
    /// 2. Find-or-create the team, player and recording for each of them.
    /// 3. Delete every catalog recording whose path was not found on disk;
    ///    its annotations go with it.
    ///
    /// Rows are committed one at a time. A failure part-way leaves the
    /// catalog partially reconciled and the next pass completes it. Over an
    /// unchanged tree a second pass writes nothing.
    pub async fn run(&self) -> Result<ScanReport, ScanError> {
        let _pass = self.guard.lock().await;
        let started = Instant::now();

        let root = self.root.clone();
        let outcome = tokio::task::spawn_blocking(move || walk_storage(&root)).await??;

        let mut report = ScanReport {
            skipped: outcome.skipped,
            ..ScanReport::default()
        };
        let mut on_disk = HashSet::with_capacity(outcome.recordings.len());

        for found in outcome.recordings {
            let location = found.location;

            let (team, created) = TeamRepo::find_or_create(&self.pool, &location.team).await?;
            if created {
                report.teams_created += 1;
                tracing::info!(team_id = team.id, team = %team.name, "Team added from storage");
            }

            let (player, created) =
                PlayerRepo::find_or_create(&self.pool, team.id, &location.player).await?;
            if created {
                report.players_created += 1;
                tracing::info!(
                    player_id = player.id,
                    team = %team.name,
                    player = %player.name,
                    "Player added from storage"
                );
            }

            let path = recording_key(&self.root_key, &found.relative);
            let input = CreateRecording {
                player_id: player.id,
                path: path.clone(),
                title: Some(location.file_name),
            };
            let (recording, created) = RecordingRepo::find_or_create(&self.pool, &input).await?;
            if created {
                report.recordings_created += 1;
                tracing::info!(recording_id = recording.id, path = %path, "Recording indexed");
            }

            on_disk.insert(path);
        }

        for (id, path) in RecordingRepo::list_paths(&self.pool).await? {
            if on_disk.contains(&path) {
                continue;
            }
            if RecordingRepo::delete(&self.pool, id).await? {
                report.recordings_removed += 1;
                tracing::info!(recording_id = id, path = %path, "Recording removed, file is gone");
            }
        }

        tracing::info!(
            root = %self.root_key,
            teams_created = report.teams_created,
            players_created = report.players_created,
            recordings_created = report.recordings_created,
            recordings_removed = report.recordings_removed,
            skipped = report.skipped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Storage reconciliation complete"
        );

        Ok(report)
    }
}
